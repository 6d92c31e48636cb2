use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use insight_sphere::forms;
use insight_sphere::oauth::{self, OAuthConfig};
use insight_sphere::{ConfigError, FileStorage, GatewayConfig, GatewayError, Outcome, SessionGateway};
use serde::Serialize;
use serde_json::{Value, json};


const NO_OAUTH_CREDENTIAL: &str = "No OAuth credential in callback URL";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("gateway setup failed: {0}")]
    Gateway(#[from] GatewayError),
    #[error("invalid JSON output: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "insight", about = "Insight-Sphere session and analytics CLI")]
struct Cli {
    /// Overrides `INSIGHT_API_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    /// Overrides `INSIGHT_STORAGE_PATH`.
    #[arg(long)]
    storage_path: Option<PathBuf>,

    /// Overrides `INSIGHT_CONNECT_TIMEOUT_SECS`.
    #[arg(long)]
    connect_timeout_secs: Option<u64>,

    /// Overrides `INSIGHT_ACTIVITY_LIMIT`.
    #[arg(long)]
    activity_limit: Option<u32>,

    /// Log gateway activity to stderr at debug level.
    #[arg(long, short, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show whether a session is held.
    Status,
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "INSIGHT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "INSIGHT_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
    /// Exchange a Google access token for a session.
    Google { access_token: String },
    /// Exchange a GitHub authorization code for a session.
    Github { code: String },
    /// Complete sign-in from the provider's redirect URL.
    OauthCallback { url: String },
    /// Print the provider sign-in URL to open in a browser.
    AuthorizeUrl {
        provider: Provider,
        #[arg(long, env = "INSIGHT_GOOGLE_CLIENT_ID", default_value = "")]
        google_client_id: String,
        #[arg(long, env = "INSIGHT_GITHUB_CLIENT_ID", default_value = "")]
        github_client_id: String,
        #[arg(long, env = "INSIGHT_OAUTH_REDIRECT_URI", default_value = "http://localhost:3000/login")]
        redirect_uri: String,
    },
    Logout,
    Profile,
    UpdateEmail { email: String },
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
    DeleteAccount,
    Trends { topic: String },
    Opinion { topic: String },
    Skill { skill: String },
    Stats,
    Activities {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Rate a candidate password without contacting the backend.
    Strength { password: String },
    RememberMe { state: Toggle },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Provider {
    Google,
    Github,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Toggle {
    On,
    Off,
}

/// JSON printed on stdout plus whether the process should exit cleanly.
#[derive(Debug)]
struct Report {
    body: Value,
    success: bool,
}

impl Report {
    fn exit_code(&self) -> ExitCode {
        if self.success { ExitCode::SUCCESS } else { ExitCode::FAILURE }
    }
}

impl Cli {
    /// Environment config with any explicit flags layered on top.
    fn gateway_config(&self) -> Result<GatewayConfig, CliError> {
        let mut config = GatewayConfig::from_env()?;
        if let Some(base_url) = &self.base_url {
            config.base_url = GatewayConfig::new(base_url)?.base_url;
        }
        if let Some(path) = &self.storage_path {
            config.storage_path.clone_from(path);
        }
        if let Some(secs) = self.connect_timeout_secs {
            config.connect_timeout_secs = secs;
        }
        if let Some(limit) = self.activity_limit {
            config.activity_limit = limit.max(1);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.gateway_config()?;
    let storage = Arc::new(FileStorage::new(config.storage_path.clone()));
    let gateway = SessionGateway::new(&config, storage)?;

    let report = run(&gateway, cli.command).await?;
    print_json(&report.body)?;
    Ok(report.exit_code())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

async fn run(gateway: &SessionGateway, command: Command) -> Result<Report, CliError> {
    match command {
        Command::Status => emit(&Outcome::Success(json!({
            "authenticated": gateway.is_authenticated(),
            "rememberMe": gateway.remember_me(),
        }))),
        Command::Login { email, password } => match forms::validate_login_input(&email, &password) {
            Ok((email, password)) => emit(&gateway.login(&email, &password).await),
            Err(message) => rejected(message),
        },
        Command::Register { email, password, confirm } => {
            match forms::validate_signup_input(&email, &password, &confirm) {
                Ok((email, password)) => emit(&gateway.register(&email, &password).await),
                Err(message) => rejected(message),
            }
        }
        Command::Google { access_token } => emit(&gateway.login_with_google(&access_token).await),
        Command::Github { code } => emit(&gateway.login_with_github(&code).await),
        Command::OauthCallback { url } => match oauth::parse_callback(&url) {
            Some(callback) => emit(&gateway.complete_oauth(&callback).await),
            None => rejected(NO_OAUTH_CREDENTIAL),
        },
        Command::AuthorizeUrl { provider, google_client_id, github_client_id, redirect_uri } => {
            let oauth = OAuthConfig { google_client_id, github_client_id, redirect_uri };
            emit(&Outcome::Success(authorize_url(&oauth, provider)))
        }
        Command::Logout => {
            gateway.logout();
            emit(&Outcome::Success(()))
        }
        Command::Profile => {
            let outcome = gateway.get_profile().await.map(|profile| {
                json!({ "displayName": profile.display_name(), "profile": profile })
            });
            emit(&outcome)
        }
        Command::UpdateEmail { email } => emit(&gateway.update_profile(email.trim()).await),
        Command::ChangePassword { current, new, confirm } => {
            match forms::validate_password_change(&current, &new, &confirm) {
                Ok((current, new)) => emit(&gateway.update_password(current, new).await),
                Err(message) => rejected(message),
            }
        }
        Command::DeleteAccount => emit(&gateway.delete_account().await),
        Command::Trends { topic } => emit(&gateway.analyze_trends(&topic).await),
        Command::Opinion { topic } => emit(&gateway.analyze_opinion(&topic).await),
        Command::Skill { skill } => emit(&gateway.build_skill_path(&skill).await),
        Command::Stats => emit(&gateway.dashboard_stats().await),
        Command::Activities { limit } => emit(&gateway.recent_activities(limit).await),
        Command::Strength { password } => {
            let strength = forms::password_strength(&password);
            emit(&Outcome::Success(json!({ "score": strength.score(), "label": strength.label() })))
        }
        Command::RememberMe { state } => emit(&gateway.set_remember_me(state == Toggle::On)),
    }
}

fn authorize_url(oauth: &OAuthConfig, provider: Provider) -> String {
    match provider {
        Provider::Google => oauth.google_authorize_url(),
        Provider::Github => oauth.github_authorize_url(),
    }
}

fn emit<T: Serialize>(outcome: &Outcome<T>) -> Result<Report, CliError> {
    Ok(Report { body: serde_json::to_value(outcome)?, success: outcome.is_success() })
}

fn rejected(message: &str) -> Result<Report, CliError> {
    emit(&Outcome::<()>::Failure(message.to_owned()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
