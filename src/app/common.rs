use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgMatches};
use log::info;
use std::{
    fs::{self, File},
    io::BufReader,
    path::PathBuf,
    str::FromStr,
};
use tracelearn::io::TraceReader;
use tracelearn::learn::ArmsConfig;
use tracelearn::trace::TraceCorpus;

pub(crate) const ARG_INPUT: &str = "INPUT";

pub(crate) fn input_arg() -> Arg<'static, 'static> {
    Arg::with_name(ARG_INPUT)
        .short("f")
        .empty_values(false)
        .multiple(false)
        .help("the input file that contains the trace corpus")
        .required(true)
}

pub(crate) const ARG_OUTPUT: &str = "OUTPUT";

pub(crate) fn output_arg(help: &'static str) -> Arg<'static, 'static> {
    Arg::with_name(ARG_OUTPUT)
        .short("o")
        .long("output")
        .empty_values(false)
        .multiple(false)
        .help(help)
        .required(false)
}

const ARG_UPPER_BOUND: &str = "UPPER_BOUND";
const ARG_MIN_SUPPORT: &str = "MIN_SUPPORT";
const ARG_THRESHOLD: &str = "THRESHOLD";
const ARG_STRUCTURAL_WEIGHT: &str = "STRUCTURAL_WEIGHT";
const ARG_INFO_WEIGHT: &str = "INFO_WEIGHT";
const ARG_INFO3_DEFAULT: &str = "INFO3_DEFAULT";
const ARG_PLAN_DEFAULT: &str = "PLAN_DEFAULT";

pub(crate) fn config_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name(ARG_UPPER_BOUND)
            .long("upper-bound")
            .empty_values(false)
            .multiple(false)
            .help("the relation set size at which a schema is considered fully learned")
            .required(true),
        Arg::with_name(ARG_MIN_SUPPORT)
            .long("min-support")
            .empty_values(false)
            .multiple(false)
            .help("the threshold of the frequent action pair mining (defaults to 2)")
            .required(false),
        Arg::with_name(ARG_THRESHOLD)
            .long("threshold")
            .empty_values(false)
            .multiple(false)
            .help("the support rate above which a constraint weighs its rate (defaults to 0.6)")
            .required(false),
        Arg::with_name(ARG_STRUCTURAL_WEIGHT)
            .long("structural-weight")
            .empty_values(false)
            .multiple(false)
            .help("the weight of the structural constraints (defaults to 110)")
            .required(false),
        Arg::with_name(ARG_INFO_WEIGHT)
            .long("info-weight")
            .empty_values(false)
            .multiple(false)
            .help("the weight of the information constraints (defaults to 100)")
            .required(false),
        Arg::with_name(ARG_INFO3_DEFAULT)
            .long("info3-default")
            .empty_values(false)
            .multiple(false)
            .help("the default weight of the support-counted information constraints (defaults to 30)")
            .required(false),
        Arg::with_name(ARG_PLAN_DEFAULT)
            .long("plan-default")
            .empty_values(false)
            .multiple(false)
            .help("the default weight of the plan constraints (defaults to 30)")
            .required(false),
    ]
}

fn parsed_value<T>(arg_matches: &ArgMatches<'_>, key: &str, what: &str) -> Result<Option<T>>
where
    T: FromStr,
{
    arg_matches
        .value_of(key)
        .map(|s| {
            s.parse::<T>()
                .map_err(|_| anyhow!(r#"invalid value "{}" for {}"#, s, what))
        })
        .transpose()
}

pub(crate) fn read_config(arg_matches: &ArgMatches<'_>) -> Result<ArmsConfig> {
    let upper_bound = parsed_value(arg_matches, ARG_UPPER_BOUND, "the upper bound")?.unwrap();
    let mut config = ArmsConfig::new(upper_bound);
    if let Some(v) = parsed_value(arg_matches, ARG_MIN_SUPPORT, "the minimal support")? {
        config.min_support = v;
    }
    if let Some(v) = parsed_value(arg_matches, ARG_THRESHOLD, "the support rate threshold")? {
        config.threshold = v;
    }
    if let Some(v) = parsed_value(arg_matches, ARG_STRUCTURAL_WEIGHT, "the structural weight")? {
        config.structural_weight = v;
    }
    if let Some(v) = parsed_value(arg_matches, ARG_INFO_WEIGHT, "the information weight")? {
        config.info_weight = v;
    }
    if let Some(v) = parsed_value(arg_matches, ARG_INFO3_DEFAULT, "the I3 default weight")? {
        config.info3_default_weight = v;
    }
    if let Some(v) = parsed_value(arg_matches, ARG_PLAN_DEFAULT, "the plan default weight")? {
        config.plan_default_weight = v;
    }
    Ok(config)
}

pub(crate) fn read_corpus(arg_matches: &ArgMatches<'_>) -> Result<TraceCorpus> {
    let file_path = arg_matches.value_of(ARG_INPUT).unwrap();
    let canonicalized = canonicalize_file_path(file_path)?;
    info!("reading trace corpus from {:?}", canonicalized);
    let mut file_reader = BufReader::new(File::open(canonicalized)?);
    let corpus = TraceReader::default().read(&mut file_reader)?;
    info!(
        "the corpus has {} trace(s) and a vocabulary of {} fluent(s)",
        corpus.traces().len(),
        corpus.fluents().len()
    );
    Ok(corpus)
}

/// Canonicalize a path given by the user.
pub(crate) fn canonicalize_file_path(file_path: &str) -> Result<PathBuf> {
    fs::canonicalize(PathBuf::from(file_path))
        .with_context(|| format!(r#"while opening file "{}""#, file_path))
}

pub(crate) fn write_output(arg_matches: &ArgMatches<'_>, content: &str) -> Result<()> {
    if let Some(output_file) = arg_matches.value_of(ARG_OUTPUT) {
        fs::write(output_file, content)
            .with_context(|| format!(r#"while writing file "{}""#, output_file))
    } else {
        print!("{}", content);
        Ok(())
    }
}
