use super::{app_helper, command::Command, common};
use anyhow::Result;
use clap::{App, AppSettings, ArgMatches, SubCommand};
use std::io::Read;
use tracelearn::learn::{ArmsLearner, AtomEncoder};
use tracelearn::maxsat::{BufferedMaxSatSolver, MaxSatSolver, MaxSatSolverFactory};

const CMD_NAME: &str = "encode";

pub(crate) struct EncodeCommand;

impl EncodeCommand {
    pub fn new() -> Self {
        EncodeCommand
    }
}

impl<'a> Command<'a> for EncodeCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Encodes the first learning round as a WCNF instance")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_arg())
            .args(&common::config_args())
            .arg(app_helper::logging_level_cli_arg())
            .arg(common::output_arg("the output file for the encoding"))
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let corpus = common::read_corpus(arg_matches)?;
        let config = common::read_config(arg_matches)?;
        let factory = NeverInvokedFactory;
        let learner = ArmsLearner::new(config, &factory)?;
        let problem = learner.first_round_problem(&corpus)?;
        let mut encoder = AtomEncoder::default();
        let mut solver = new_buffering_solver();
        encoder.encode_into(&problem, &mut solver);
        let mut out = Vec::new();
        solver.write_instance(&mut out)?;
        common::write_output(arg_matches, &String::from_utf8(out).unwrap())
    }
}

fn new_buffering_solver() -> BufferedMaxSatSolver {
    BufferedMaxSatSolver::new(Box::new(|_| Ok(Box::new(std::io::empty()) as Box<dyn Read>)))
}

// the encode command dumps the instance instead of solving it
struct NeverInvokedFactory;

impl MaxSatSolverFactory for NeverInvokedFactory {
    fn new_solver(&self) -> Box<dyn MaxSatSolver> {
        Box::new(new_buffering_solver())
    }
}
