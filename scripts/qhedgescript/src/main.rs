use std::env;

use anyhow::ensure;
use clap::{CommandFactory, Parser};
use cmds::Cmd;
use dialoguer::Confirm;
use util::interactive_cmd::interactive_cmd;

mod cmds;
mod util;

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: cmds::Commands,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = make_cli()?;
    log::info!("{:?}", cli);
    cli.command.run()
}

fn make_cli() -> anyhow::Result<Cli> {
    if env::args().len() != 1 {
        return Ok(Cli::parse());
    }
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!("🛡️  qhedgescript: delta hedge with listed options");
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    eprintln!("🔧 Interactive mode. Start to build command...\n");
    let cmd = Cli::command();
    let args = interactive_cmd(&cmd)?;

    eprintln!("\n🎉 Command is built!");
    eprintln!("\t{}\n", args.join(" "));
    let confirmed = Confirm::new()
        .with_prompt("Run the command?".to_string())
        .report(true)
        .interact()?;

    ensure!(confirmed, "Operation cancelled.");
    Ok(Cli::parse_from(args))
}
