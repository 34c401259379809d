use anyhow::{bail, Context};
use clap::{builder::PossibleValue, Arg, Command};
use dialoguer::{Input, Select};

/// Build the argument list of `cmd` by asking for the subcommand and each
/// of its arguments in turn.
pub fn interactive_cmd(cmd: &Command) -> anyhow::Result<Vec<String>> {
    let mut dst = Vec::new();
    ask_cmd_args(cmd, &mut dst)?;
    Ok(dst)
}

fn ask_cmd_args(cmd: &Command, dst: &mut Vec<String>) -> anyhow::Result<()> {
    dst.push(cmd.get_name().to_string());
    let subcmds: Vec<_> = cmd.get_subcommands().collect();
    if subcmds.is_empty() {
        for arg in cmd.get_arguments().filter(|a| !a.is_hide_set()) {
            ask_arg(arg, dst)?;
        }
        return Ok(());
    }
    let items: Vec<_> = subcmds
        .iter()
        .map(|c| match c.get_about() {
            Some(about) => format!("{}: {}", c.get_name(), about),
            None => c.get_name().to_string(),
        })
        .collect();
    let selection = Select::new()
        .items(&items)
        .default(0)
        .with_prompt("Select subcommand")
        .interact()?;
    let subcmd = subcmds
        .get(selection)
        .context("Selected subcommand is out of range")?;
    ask_cmd_args(subcmd, dst)
}

fn ask_arg(arg: &Arg, dst: &mut Vec<String>) -> anyhow::Result<()> {
    let option = get_option_str(arg)?;
    let required = arg.is_required_set();
    let mut msg = match arg.get_help() {
        Some(help) => format!("{help}. {option}"),
        None => option.clone(),
    };
    if !required {
        msg.push_str(" (optional)");
    }

    let possible_values = arg.get_possible_values();
    let default = arg.get_default_values().first().and_then(|s| s.to_str());

    let input = if !possible_values.is_empty() {
        ask_enum(&msg, possible_values, default, required)?
    } else {
        let input = Input::<String>::new()
            .allow_empty(!required)
            .with_prompt(msg);
        match default {
            Some(default) => input.default(default.to_string()).interact_text()?,
            None => input.interact_text()?,
        }
    };

    let input = input.trim();
    if input.is_empty() {
        return Ok(());
    }
    dst.push(option);
    dst.push(input.to_string());
    Ok(())
}

fn ask_enum(
    msg: &str,
    possibilities: Vec<PossibleValue>,
    default: Option<&str>,
    required: bool,
) -> anyhow::Result<String> {
    let mut items: Vec<_> = possibilities.iter().map(|p| p.get_name()).collect();
    if !required && default.is_none() {
        items.push("(skip)");
    }
    let default = default
        .and_then(|d| items.iter().position(|i| *i == d))
        .unwrap_or(0);
    let selection = Select::new()
        .items(&items)
        .default(default)
        .with_prompt(msg)
        .interact()?;
    Ok(possibilities
        .get(selection)
        .map(|p| p.get_name().to_string())
        .unwrap_or_default())
}

fn get_option_str(arg: &Arg) -> anyhow::Result<String> {
    if let Some(long) = arg.get_long() {
        Ok(format!("--{long}"))
    } else if let Some(short) = arg.get_short() {
        Ok(format!("-{short}"))
    } else {
        bail!("Positional argument {} is not supported", arg.get_id());
    }
}
