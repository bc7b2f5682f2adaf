use clap::Subcommand;
use traitscope_core::Config;

#[derive(Subcommand)]
pub enum TraitsAction {
    /// List the traits the questionnaire asks about
    List {
        /// Output the full catalog as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: TraitsAction) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Config::load_or_default().catalog()?;

    match action {
        TraitsAction::List { json } => {
            if json {
                let questions: Vec<_> = catalog.questions().collect();
                println!("{}", serde_json::to_string_pretty(&questions)?);
            } else {
                for question in catalog.questions() {
                    println!("{:<24} {}", question.id, question.title);
                }
            }
        }
    }
    Ok(())
}
