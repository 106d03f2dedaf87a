use clap::{value_parser, Arg, ArgAction, Command};
use signorder_cli::{default_config_toml, run_apply, run_validate};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("signorder")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Recipient signing-order editor")
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value("warn")
                .help("Tracing filter, e.g. `debug` or `signorder_engine=trace`"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("validate")
                .about("Validate a recipient list and print it normalized")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .short('i')
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Recipient form JSON"),
                ),
        )
        .subcommand(
            Command::new("apply")
                .about("Replay an edit script against a recipient list")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .short('i')
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Recipient form JSON"),
                )
                .arg(
                    Arg::new("script")
                        .long("script")
                        .short('s')
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON array of edit intents"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .value_parser(value_parser!(PathBuf))
                        .help("Editor configuration TOML"),
                )
                .arg(
                    Arg::new("stop-on-refusal")
                        .long("stop-on-refusal")
                        .action(ArgAction::SetTrue)
                        .help("Stop at the first step that does not apply cleanly"),
                ),
        )
        .subcommand(Command::new("config").about("Print the default configuration"))
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    let log_level = matches
        .get_one::<String>("log-level")
        .map_or("warn", String::as_str);
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match matches.subcommand() {
        Some(("validate", args)) => {
            let Some(input) = args.get_one::<PathBuf>("input") else {
                anyhow::bail!("--input is required");
            };
            match run_validate(input) {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    eprintln!("error: {err:#}");
                    std::process::exit(1);
                }
            }
        }
        Some(("apply", args)) => {
            let (Some(input), Some(script)) = (
                args.get_one::<PathBuf>("input"),
                args.get_one::<PathBuf>("script"),
            ) else {
                anyhow::bail!("--input and --script are required");
            };
            let config = args.get_one::<PathBuf>("config").map(PathBuf::as_path);
            let stop_on_refusal = args.get_flag("stop-on-refusal");

            let report = run_apply(input, script, config, stop_on_refusal)?;
            eprint!("{}", report.generate_text());
            println!("{}", serde_json::to_string_pretty(&report.list)?);

            std::process::exit(if report.passed() { 0 } else { 1 });
        }
        Some(("config", _)) => {
            print!("{}", default_config_toml()?);
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn parses_apply_flags() {
        let matches = cli()
            .try_get_matches_from([
                "signorder",
                "apply",
                "-i",
                "list.json",
                "-s",
                "script.json",
                "--stop-on-refusal",
                "--log-level",
                "debug",
            ])
            .unwrap();

        assert_eq!(
            matches.get_one::<String>("log-level").map(String::as_str),
            Some("debug")
        );
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "apply");
        assert!(args.get_flag("stop-on-refusal"));
        assert!(args.get_one::<PathBuf>("config").is_none());
    }
}
