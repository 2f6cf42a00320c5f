use json_settings_gen::cli::CommandLineInterface;

fn main() -> anyhow::Result<()> {
    let command_line_interface = CommandLineInterface::load();
    command_line_interface.run()
}
