use std::process::ExitCode;

use gql_codegen::cli::CommandLineInterface;

fn main() -> ExitCode {
    let command_line_interface = CommandLineInterface::load();
    command_line_interface.run()
}
