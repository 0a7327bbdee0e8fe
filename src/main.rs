//! Command line front end for the mania ruleset codec.
//!
//! Usage:
//!   rvsrg-ruleset variants
//!   rvsrg-ruleset decode 576
//!   rvsrg-ruleset encode NC FI 7K
//!   rvsrg-ruleset bindings 1004 --settings conf/ruleset.toml
//!   rvsrg-ruleset catalog --json
//!   rvsrg-ruleset replay <hash> --dir data/r

use clap::{Parser, Subcommand};
use rvsrg_ruleset::database::{REPLAY_DIR, load_replay};
use rvsrg_ruleset::models::mods::total_score_multiplier;
use rvsrg_ruleset::models::settings::RulesetSettings;
use rvsrg_ruleset::{KeyBindings, Layout, Mod, ModEntry, ModType, core::input::keycode_name};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "rvsrg-ruleset")]
#[command(about = "Inspect mania mods, legacy mod flags, variants and key bindings")]
struct Args {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every selectable variant
    Variants,
    /// Decode a legacy mod bitmask (decimal or 0x-prefixed hex)
    Decode { flags: String },
    /// Encode mod acronyms into a legacy bitmask
    Encode { acronyms: Vec<String> },
    /// Show the key bindings of a variant
    Bindings {
        variant: i32,
        /// Settings file holding custom keybinds
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// List the mods of every category
    Catalog,
    /// Show the header of a stored replay
    Replay {
        hash: String,
        /// Directory holding replay files
        #[arg(long, default_value = REPLAY_DIR)]
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    match &args.command {
        Command::Variants => print_variants(args.json),
        Command::Decode { flags } => print_decoded(parse_flags(flags)?, args.json),
        Command::Encode { acronyms } => {
            let mods = acronyms
                .iter()
                .map(|a| Mod::from_acronym(a))
                .collect::<Result<Vec<_>, _>>()?;
            let flags = rvsrg_ruleset::encode_legacy_flags(&mods);
            let multiplier = total_score_multiplier(&mods);
            if args.json {
                println!("{}", json!({ "flags": flags, "score_multiplier": multiplier }));
            } else {
                println!("{} ({:#010x}) x{:.2}", flags, flags, multiplier);
            }
            Ok(())
        }
        Command::Bindings { variant, settings } => {
            let layout = Layout::from_variant(*variant)?;
            let bindings = match settings {
                Some(path) => KeyBindings::from_settings(layout, &RulesetSettings::load(path)),
                None => KeyBindings::new(layout),
            };
            print_bindings(&bindings, args.json)
        }
        Command::Catalog => print_catalog(args.json),
        Command::Replay { hash, dir } => print_replay(dir, hash, args.json),
    }
}

fn parse_flags(s: &str) -> Result<u32, std::num::ParseIntError> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    }
}

fn print_variants(as_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut rows = Vec::new();
    for variant in rvsrg_ruleset::enumerate_variants() {
        rows.push((variant, rvsrg_ruleset::display_name(variant)?));
    }

    if as_json {
        let rows: Vec<_> = rows
            .iter()
            .map(|(variant, name)| json!({ "variant": variant, "name": name }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for (variant, name) in rows {
            println!("{:>5}  {}", variant, name);
        }
    }
    Ok(())
}

fn print_decoded(flags: u32, as_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mods = rvsrg_ruleset::decode_legacy_flags(flags);
    let conflicts = rvsrg_ruleset::models::mods::validate_combination(&mods);

    if as_json {
        let acronyms: Vec<_> = mods.iter().map(Mod::acronym).collect();
        let conflicts: Vec<_> = conflicts
            .iter()
            .map(|(a, b)| [a.acronym(), b.acronym()])
            .collect();
        println!(
            "{}",
            json!({ "flags": flags, "mods": acronyms, "conflicts": conflicts })
        );
        return Ok(());
    }

    for m in &mods {
        println!("{:<4} {}", m.acronym(), m.kind().name());
    }
    for (a, b) in conflicts {
        println!("warning: {} and {} cannot be combined", a.acronym(), b.acronym());
    }
    Ok(())
}

fn print_bindings(bindings: &KeyBindings, as_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if as_json {
        let rows: Vec<_> = bindings
            .bindings()
            .iter()
            .map(|b| {
                json!({
                    "stage": b.action.stage,
                    "column": b.action.column,
                    "key": keycode_name(b.key),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", bindings.layout());
    for b in bindings.bindings() {
        println!(
            "  stage {} column {:>2}  {}",
            b.action.stage + 1,
            b.action.column + 1,
            keycode_name(b.key).unwrap_or("?")
        );
    }
    Ok(())
}

fn print_replay(dir: &Path, hash: &str, as_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let replay = load_replay(dir, hash)?;
    let layout = replay.layout()?;
    let acronyms: Vec<_> = replay.mods().iter().map(Mod::acronym).collect();

    if as_json {
        println!(
            "{}",
            json!({
                "variant": replay.variant,
                "layout": layout.to_string(),
                "mods": acronyms,
                "rate": replay.rate,
                "inputs": replay.inputs.len(),
            })
        );
        return Ok(());
    }

    println!("{} ({})", layout, replay.variant);
    println!("mods:   {}", acronyms.join(" "));
    println!("rate:   {:.2}", replay.rate);
    println!("inputs: {}", replay.inputs.len());
    Ok(())
}

fn entry_acronyms(entry: &ModEntry) -> Vec<&'static str> {
    entry.kinds().iter().map(|k| k.acronym()).collect()
}

fn print_catalog(as_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if as_json {
        let categories: Vec<_> = ModType::ALL
            .iter()
            .map(|t| {
                let entries: Vec<_> = rvsrg_ruleset::mods_for_category(*t)
                    .iter()
                    .map(entry_acronyms)
                    .collect();
                json!({ "category": t, "mods": entries })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    for mod_type in ModType::ALL {
        let entries = rvsrg_ruleset::mods_for_category(mod_type);
        if entries.is_empty() {
            continue;
        }
        println!("{:?}", mod_type);
        for entry in &entries {
            println!("  {}", entry_acronyms(entry).join(" / "));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        assert_eq!(parse_flags("576"), Ok(576));
        assert_eq!(parse_flags("0x240"), Ok(576));
        assert_eq!(parse_flags("0X4000"), Ok(1 << 14));
        assert_eq!(parse_flags("0"), Ok(0));
        assert_eq!(parse_flags("0xFFFFFFFF"), Ok(u32::MAX));
    }

    #[test]
    fn test_parse_flags_rejects_garbage() {
        assert!(parse_flags("").is_err());
        assert!(parse_flags("0x").is_err());
        assert!(parse_flags("-1").is_err());
        assert!(parse_flags("12ab").is_err());
        assert!(parse_flags("0x100000000").is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let args = Args::try_parse_from(["rvsrg-ruleset", "replay", "abc"]).unwrap();
        match args.command {
            Command::Replay { hash, dir } => {
                assert_eq!(hash, "abc");
                assert_eq!(dir, PathBuf::from(REPLAY_DIR));
            }
            _ => panic!("expected replay"),
        }

        let args = Args::try_parse_from(["rvsrg-ruleset", "encode", "NC", "7K", "--json"]).unwrap();
        assert!(args.json);
        assert!(matches!(args.command, Command::Encode { ref acronyms } if acronyms.len() == 2));
    }
}
