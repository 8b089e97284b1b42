// Demo binary: parses its own arguments and prints what was collected.
//
// GETOPT_MODE selects the dash convention (bundling, singledash, normal),
// GETOPT_UNKNOWN the unknown-option policy (fail, warn, pass).
// GETOPT_LOG_SINK=stdout|stderr turns on debug logging to that stream.

use std::collections::BTreeMap;

use getoptions::diagnostics::{self, Diagnostics, Sink};
use getoptions::*;

fn unknown_mode(s: &str) -> UnknownMode {
    match s {
        "warn" => UnknownMode::Warn,
        "pass" => UnknownMode::Pass,
        _ => UnknownMode::Fail,
    }
}

fn diagnostics_config() -> Diagnostics {
    let sink = match std::env::var("GETOPT_LOG_SINK").as_deref() {
        Ok("stdout") => Sink::Stdout,
        Ok(_) => Sink::Stderr,
        Err(_) => return Diagnostics::default(),
    };
    Diagnostics {
        enabled: true,
        sink,
        ..Diagnostics::default()
    }
}

fn declare<'a>(
    opt: &mut GetOpt<'a>,
    verbose: &'a mut bool,
    defines: &'a mut BTreeMap<String, String>,
) -> std::result::Result<(), DefinitionError> {
    opt.define(Opt::bool("flag", false).alias("f"))?
        .define(Opt::negatable_var(verbose, "verbose", false).alias("v"))?
        .define(Opt::string("name", "world").alias("n"))?
        .define(Opt::int("count", 0).alias("c"))?
        .define(Opt::int_optional("level", 1).alias("l"))?
        .define(Opt::string_list("include").alias("I"))?
        .define(Opt::string_map_var(defines, "define").alias("D"))?;
    Ok(())
}

fn main() {
    diagnostics::init(diagnostics_config());

    let mode = match std::env::var("GETOPT_MODE") {
        Ok(s) => s.parse::<Mode>().unwrap_or_else(|e| {
            eprintln!("getopt-demo: {}", e);
            std::process::exit(2);
        }),
        Err(_) => Mode::Normal,
    };

    let mut verbose = false;
    let mut defines = BTreeMap::new();

    let mut opt = GetOpt::new();
    opt.set_mode(mode);
    if let Ok(s) = std::env::var("GETOPT_UNKNOWN") {
        opt.set_unknown_mode(unknown_mode(&s));
    }

    if let Err(e) = declare(&mut opt, &mut verbose, &mut defines) {
        eprintln!("getopt-demo: {}", e);
        std::process::exit(2);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let outcome = opt.parse(args);
    let result = opt.result();
    println!("mode: {:?}", opt.mode());
    drop(opt);

    for (name, value) in &result.values {
        println!("{}={}", name, value);
    }
    let called: Vec<&str> = result.called.iter().map(|s| s.as_str()).collect();
    println!("called: {}", called.join(","));
    println!("remaining: {}", result.remaining.join(" "));
    println!("bound: verbose={} defines={}", verbose, defines.len());

    if let Err(e) = outcome {
        eprintln!("getopt-demo: {}", e);
        std::process::exit(1);
    }
}
