use super::{app_helper, command::Command, common};
use anyhow::Result;
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::info;
use tracelearn::io::ModelWriter;
use tracelearn::learn::{ArmsLearner, Atom, LearningListener, WeightedProblem};
use tracelearn::maxsat::ExternalMaxSatSolverFactory;
use tracelearn::model::ActionSchema;

const CMD_NAME: &str = "learn";

const ARG_SOLVER: &str = "SOLVER";
const ARG_SOLVER_OPTIONS: &str = "SOLVER_OPTIONS";
const ARG_DEBUG: &str = "DEBUG";

pub(crate) struct LearnCommand;

impl LearnCommand {
    pub fn new() -> Self {
        LearnCommand
    }
}

impl<'a> Command<'a> for LearnCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Learns an action model from a trace corpus")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_arg())
            .args(&common::config_args())
            .arg(app_helper::logging_level_cli_arg())
            .arg(
                Arg::with_name(ARG_SOLVER)
                    .long("solver")
                    .empty_values(false)
                    .multiple(false)
                    .help("the command launching the external MaxSAT solver")
                    .required(true),
            )
            .arg(
                Arg::with_name(ARG_SOLVER_OPTIONS)
                    .long("solver-opt")
                    .requires(ARG_SOLVER)
                    .empty_values(false)
                    .multiple(true)
                    .help("an option to give to the external MaxSAT solver")
                    .required(false),
            )
            .arg(
                Arg::with_name(ARG_DEBUG)
                    .long("debug")
                    .takes_value(false)
                    .help("logs the constraints and the decoded facts of each round"),
            )
            .arg(common::output_arg("the output file for the learned model"))
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let corpus = common::read_corpus(arg_matches)?;
        let config = common::read_config(arg_matches)?;
        let program = arg_matches.value_of(ARG_SOLVER).unwrap().to_string();
        let options = arg_matches
            .values_of(ARG_SOLVER_OPTIONS)
            .map(|v| v.map(|o| o.to_string()).collect::<Vec<String>>())
            .unwrap_or_default();
        info!("using {} as the external MaxSAT solver", program);
        let factory = ExternalMaxSatSolverFactory::new(program, options);
        let mut learner = ArmsLearner::new(config, &factory)?;
        learner.add_listener(Box::new(LoggingListener {
            verbose: arg_matches.is_present(ARG_DEBUG),
        }));
        let model = learner.learn(&corpus)?;
        let mut out = Vec::new();
        ModelWriter.write(&model, &mut out)?;
        common::write_output(arg_matches, &String::from_utf8(out).unwrap())
    }
}

struct LoggingListener {
    verbose: bool,
}

impl LearningListener for LoggingListener {
    fn constraints_generated(&mut self, round: usize, problem: &WeightedProblem) {
        info!("round {}: {} weighted constraints", round, problem.len());
        if self.verbose {
            for (constraint, weight) in problem.iter() {
                info!("[{}] {}", weight, constraint);
            }
        }
    }

    fn round_solved(&mut self, round: usize, facts: &[(Atom, bool)]) {
        info!("round {}: the oracle decoded {} facts", round, facts.len());
        if self.verbose {
            for (atom, value) in facts {
                info!("{} = {}", atom, value);
            }
        }
    }

    fn schema_retired(&mut self, round: usize, schema: &ActionSchema) {
        info!(r#"round {}: schema "{}" is fully learned"#, round, schema);
    }
}
