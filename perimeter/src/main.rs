use perimeter::commands::command_argument_builder;
use perimeter::handlers::{handle_scan, init_logging, print_banner};

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();

    match chosen_command.subcommand() {
        Some(("scan", sub_matches)) => {
            init_logging(sub_matches.get_count("verbose"));

            if !sub_matches.get_flag("quiet") {
                print_banner();
            }

            if let Err(e) = handle_scan(sub_matches).await {
                eprintln!("✗ {:#}", e);
                std::process::exit(1);
            }
        }
        _ => unreachable!("clap should ensure we don't get here"),
    }
}
