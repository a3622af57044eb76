use clap::{Args, Parser, Subcommand};
use client::net::api::{ActionFault, ApiClient};
use client::pages::register::{FormResetPolicy, RegistrationPage, SubmitOutcome};
use client::state::{FormField, Severity, Store};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("health check failed: {0}")]
    Health(#[from] ActionFault),
    #[error("form has errors")]
    Invalid,
    #[error("registration failed: {0}")]
    Registration(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "signup", about = "Registration flow client")]
struct Cli {
    #[arg(long, env = "SIGNUP_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up.
    Ping,
    /// Fill in the registration form and submit it.
    Register(RegisterArgs),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    full_name: String,

    #[arg(long, help = "Date of birth, e.g. 1990-04-23")]
    date_of_birth: String,

    #[arg(long)]
    phone_number: String,

    #[arg(long)]
    email: String,

    #[arg(long, env = "SIGNUP_PASSWORD", hide_env_values = true)]
    password: String,

    #[arg(long, default_value_t = false, help = "Accept the terms and conditions")]
    accept_terms: bool,

    #[arg(long, default_value_t = false, help = "Keep the entered details after success")]
    keep_details: bool,
}

impl RegisterArgs {
    fn fields(&self) -> [(FormField, &str); 5] {
        [
            (FormField::FullName, self.full_name.as_str()),
            (FormField::DateOfBirth, self.date_of_birth.as_str()),
            (FormField::PhoneNumber, self.phone_number.as_str()),
            (FormField::Email, self.email.as_str()),
            (FormField::Password, self.password.as_str()),
        ]
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let api = ApiClient::new(&cli.base_url);

    match cli.command {
        Command::Ping => run_ping(&api).await,
        Command::Register(args) => run_register(&api, &args).await,
    }
}

async fn run_ping(api: &ApiClient) -> Result<(), CliError> {
    api.health().await?;
    println!("ok");
    Ok(())
}

async fn run_register(api: &ApiClient, args: &RegisterArgs) -> Result<(), CliError> {
    let policy = if args.keep_details { FormResetPolicy::KeepDetails } else { FormResetPolicy::ClearForm };
    let mut store = Store::new();
    let mut page = RegistrationPage::new().with_reset_policy(policy);

    for (field, value) in args.fields() {
        page.input(&mut store, field, value);
    }
    page.set_terms_accepted(args.accept_terms);

    let outcome = page.submit(&mut store, api).await;
    print_snackbar(&store);

    match outcome {
        SubmitOutcome::Registered => {
            if let Some(session) = &store.state().user_session {
                println!("{}", serde_json::to_string_pretty(session)?);
            }
            Ok(())
        }
        SubmitOutcome::Invalid => {
            for error in page.errors().iter() {
                let label = error.field().map_or("terms", FormField::key);
                eprintln!("  {label}: {error}");
            }
            Err(CliError::Invalid)
        }
        SubmitOutcome::Failed(message) => Err(CliError::Registration(message)),
        SubmitOutcome::Busy => Err(CliError::Registration("a submission is already pending".to_owned())),
    }
}

fn print_snackbar(store: &Store) {
    let snackbar = &store.state().snackbar;
    if !snackbar.open {
        return;
    }
    let tag = match snackbar.severity {
        Severity::Success => "success",
        Severity::Error => "error",
        Severity::Info => "info",
        Severity::Warning => "warning",
    };
    eprintln!("[{tag}] {}", snackbar.msg);
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
