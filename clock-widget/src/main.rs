use std::io::{self, Write};
use std::net::IpAddr;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use clock_widget::clock::{run_or_report, PreloadedFonts, SystemClock, DEFAULT_FONT_TIMEOUT};
use clock_widget::config::{AppConfig, DEFAULT_PORT};
use clock_widget::embed::UrlGenerator;
use clock_widget::error::WidgetError;
use clock_widget::fonts::FONT_LIST_URL;
use clock_widget::form::{FormState, CUSTOM_PRESET};
use clock_widget::params::WidgetConfig;
use clock_widget::stylesheet::generate_css;
use clock_widget::terminal::TerminalLabel;

#[derive(Parser)]
#[command(name = "clockwidget", version)]
#[command(about = "Embeddable clock widget: configurator server, embed URLs, terminal clock")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the configurator, the widget page and the embed API
    Serve {
        /// Address to bind
        #[arg(long, env = "CLOCK_WIDGET_HOST", default_value = "127.0.0.1")]
        host: IpAddr,

        /// Server port
        #[arg(long, env = "CLOCK_WIDGET_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,

        /// JSON document listing the selectable fonts
        #[arg(long, env = "CLOCK_WIDGET_FONT_LIST_URL", default_value = FONT_LIST_URL)]
        font_list_url: String,

        /// Quiet period before the preview is recomputed
        #[arg(long, env = "CLOCK_WIDGET_DEBOUNCE_MS", default_value_t = 300)]
        debounce_ms: u64,

        /// How long notifications stay on screen
        #[arg(long, env = "CLOCK_WIDGET_NOTIFICATION_MS", default_value_t = 3000)]
        notification_ms: u64,

        /// Upper bound on outgoing font requests
        #[arg(long, env = "CLOCK_WIDGET_FONT_TIMEOUT_MS", default_value_t = 3000)]
        font_timeout_ms: u64,
    },

    /// Print the embed URL for the given settings
    Url {
        #[command(flatten)]
        form: FormArgs,

        /// Configurator page the widget URL is resolved against
        #[arg(long, default_value = "http://localhost:3333/")]
        base: String,
    },

    /// Print the custom CSS block for the given settings
    Css {
        #[command(flatten)]
        form: FormArgs,
    },

    /// Run the clock in this terminal
    Clock {
        /// Widget URL or bare query string
        source: Option<String>,

        /// Show UTC instead of local time
        #[arg(long)]
        utc: bool,
    },

    /// Format one instant with a token string
    Format {
        /// Token string, e.g. "dddd, MMMM Do YYYY"
        tokens: String,

        /// RFC 3339 timestamp (default: now)
        #[arg(long)]
        at: Option<String>,
    },
}

/// Configurator form fields. Any styling flag switches custom styling on.
#[derive(Args)]
struct FormArgs {
    /// Date format token string
    #[arg(long)]
    date_format: Option<String>,

    /// CSS font-family
    #[arg(long)]
    font_family: Option<String>,

    #[arg(long)]
    font_size: Option<String>,

    #[arg(long)]
    font_weight: Option<String>,

    /// Text color, e.g. "#ff0000"
    #[arg(long)]
    color: Option<String>,

    #[arg(long)]
    letter_spacing: Option<String>,

    #[arg(long)]
    text_transform: Option<String>,

    #[arg(long)]
    text_shadow: Option<String>,
}

impl FormArgs {
    fn into_form(self) -> FormState {
        let mut form = FormState::initial();
        if let Some(format) = self.date_format {
            form.date_format_preset = Some(CUSTOM_PRESET.to_string());
            form.date_format = Some(format);
        }
        form.font_family = self.font_family;
        form.custom_styling = [
            &self.font_size,
            &self.font_weight,
            &self.color,
            &self.letter_spacing,
            &self.text_transform,
            &self.text_shadow,
        ]
        .iter()
        .any(|v| v.is_some());
        form.font_size = self.font_size;
        form.font_weight = self.font_weight;
        form.color = self.color;
        form.letter_spacing = self.letter_spacing;
        form.text_transform = self.text_transform;
        form.text_shadow = self.text_shadow;
        form
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Serve {
            host,
            port,
            font_list_url,
            debounce_ms,
            notification_ms,
            font_timeout_ms,
        } => {
            let config = Arc::new(AppConfig {
                host,
                port,
                font_list_url,
                debounce: Duration::from_millis(debounce_ms),
                notification_lifetime: Duration::from_millis(notification_ms),
                font_timeout: Duration::from_millis(font_timeout_ms),
            });
            let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
            rt.block_on(clock_widget::server::run_server(config))
                .context("server error")?;
        }

        Commands::Url { form, base } => {
            let urls = UrlGenerator::new(&base)?;
            println!("{}", urls.generate_url(&form.into_form()));
        }

        Commands::Css { form } => {
            let css = generate_css(&form.into_form());
            if !css.is_empty() {
                println!("{css}");
            }
        }

        Commands::Clock { source, utc } => {
            let config = Arc::new(widget_config(source.as_deref())?);
            let time = if utc { SystemClock::Utc } else { SystemClock::Local };
            let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
            rt.block_on(run_terminal_clock(config, time))?;
        }

        Commands::Format { tokens, at } => {
            let instant = match at {
                Some(at) => DateTime::parse_from_rfc3339(&at)
                    .map_err(|_| WidgetError::InvalidDate(at.clone()))?,
                None => Local::now().fixed_offset(),
            };
            println!("{}", clock_widget::datefmt::format(&instant, &tokens));
        }
    }
    Ok(())
}

fn widget_config(source: Option<&str>) -> Result<WidgetConfig> {
    let Some(source) = source else {
        return Ok(WidgetConfig::default());
    };
    if source.contains("://") {
        let url = url::Url::parse(source).with_context(|| format!("invalid widget URL '{source}'"))?;
        Ok(WidgetConfig::from_url(&url))
    } else {
        Ok(WidgetConfig::from_query(source))
    }
}

async fn run_terminal_clock(config: Arc<WidgetConfig>, time: SystemClock) -> Result<()> {
    let label = TerminalLabel::new(io::stdout(), &config);
    let mut fallback = TerminalLabel::new(io::stderr(), &config);
    tokio::select! {
        result = run_or_report(config, Some(label), time, &PreloadedFonts, DEFAULT_FONT_TIMEOUT, &mut fallback) => {
            result?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for ctrl-c")?;
            println!();
            io::stdout().flush()?;
        }
    }
    Ok(())
}
