//! Completions command - print a shell completion script

use std::io::Write;

use clap_complete::Shell;

use crate::cli::Cli;

/// Generate static shell completions into `buf`
pub fn execute<W: Write>(shell: Shell, buf: &mut W) {
    let mut cmd = Cli::command_definition();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, buf);
}
