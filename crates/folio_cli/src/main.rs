//! Folio CLI
//!
//! Drive the portfolio page headlessly: sweep the scroll position, navigate
//! between sections, inspect content, manage the theme preference and send
//! the contact form.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_content::contact::relay_payload;
use folio_content::{
    registry, to_svg, ColorScheme, ContactController, ContactForm, HttpMailRelay, Icon,
    SubmitOutcome, ThemeController,
};
use folio_core::{DocumentHost, PreferenceStore};
use folio_widgets::Page;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::FolioConfig;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Portfolio scroll animation runtime", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./folio.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep the page from top to bottom and report what fired
    Simulate {
        /// Sweep back up after reaching the bottom
        #[arg(long)]
        round_trip: bool,
    },

    /// Smooth-scroll to a section and report the outcome
    Navigate {
        /// Section id or fragment (e.g. `projects` or `#projects`)
        target: String,

        /// Starting scroll position
        #[arg(long, default_value = "0")]
        from: f32,
    },

    /// Print content tables as JSON
    Content {
        /// Table to print (personal, nav, skills, education, projects,
        /// contact, certifications, site); all when omitted
        table: Option<String>,
    },

    /// Print an icon as SVG
    Icon {
        /// Icon name (`GraduationCap` or `graduation-cap`)
        name: String,

        #[arg(short, long, default_value = "24")]
        size: f32,
    },

    /// Show or change the theme preference
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },

    /// Send a message through the contact relay
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, default_value = "")]
        subject: String,

        #[arg(long)]
        message: String,

        /// Print the relay payload instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the page layout and runtime settings
    Info,
}

#[derive(Subcommand)]
enum ThemeCommands {
    /// Print the current scheme
    Show,
    /// Switch between light and dark and save the choice
    Toggle,
    /// Save a scheme (light or dark)
    Set { scheme: String },
    /// Forget the saved choice
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = FolioConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Simulate { round_trip } => cmd_simulate(&config, round_trip),
        Commands::Navigate { target, from } => cmd_navigate(&config, &target, from),
        Commands::Content { table } => cmd_content(table.as_deref()),
        Commands::Icon { name, size } => cmd_icon(&name, size),
        Commands::Theme { command } => cmd_theme(&config, command.unwrap_or(ThemeCommands::Show)),
        Commands::Contact {
            name,
            email,
            subject,
            message,
            dry_run,
        } => cmd_contact(
            &config,
            ContactForm::new(name, email, subject, message),
            dry_run,
        ),
        Commands::Info => cmd_info(&config),
    }
}

fn build_page(config: &FolioConfig) -> Result<Page> {
    Page::build(config.page.clone()).context("Failed to build page")
}

fn report_reveals(page: &Page) {
    println!();
    println!("{:<12} {:<16} {:<10} {:>5} {:>9}", "section", "preset", "phase", "plays", "reversals");
    for reveal in page.reveals() {
        let stats = reveal.stats().unwrap_or_default();
        let phase = reveal
            .phase()
            .map(|phase| format!("{:?}", phase))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<12} {:<16} {:<10} {:>5} {:>9}",
            reveal.section_id(),
            reveal.intent().preset.name(),
            phase,
            stats.plays,
            stats.reversals
        );
    }
}

fn sweep(page: &mut Page, from: f32, to: f32, duration_ms: f32, frame_ms: f32) {
    let frames = (duration_ms / frame_ms).ceil().max(1.0) as u32;
    let mut active = page.active_section();
    for frame in 0..=frames {
        let t = frame as f32 / frames as f32;
        page.user_scroll(from + (to - from) * t);
        page.frame(frame_ms);

        let now = page.active_section();
        if now != active {
            info!(
                "{:>7.0}ms  scroll {:>6.0}px  progress {:>5.1}%  active -> {}",
                page.now_ms(),
                page.scroll_y(),
                page.progress() * 100.0,
                now
            );
            active = now;
        }
    }
}

fn cmd_simulate(config: &FolioConfig, round_trip: bool) -> Result<()> {
    let mut page = build_page(config)?;
    let sim = &config.simulation;
    let max_scroll = page.document().borrow().max_scroll();

    info!(
        "Sweeping {} sections, {:.0}px of scroll over {:.0}ms",
        page.config().sections.len(),
        max_scroll,
        sim.sweep_ms
    );

    sweep(&mut page, 0.0, max_scroll, sim.sweep_ms, sim.frame_ms);
    page.run_for(sim.settle_ms, sim.frame_ms);
    if round_trip {
        sweep(&mut page, max_scroll, 0.0, sim.sweep_ms, sim.frame_ms);
        page.run_for(sim.settle_ms, sim.frame_ms);
    }

    report_reveals(&page);
    Ok(())
}

fn cmd_navigate(config: &FolioConfig, target: &str, from: f32) -> Result<()> {
    let mut page = build_page(config)?;
    let sim = &config.simulation;
    if from > 0.0 {
        page.user_scroll(from);
        page.frame(sim.frame_ms);
    }

    let navigation = page.navigate_to_fragment(target);
    let limit = 4.0 * folio_widgets::navigation::NAVIGATION_DURATION_MS;
    if !page.run_until_finished(&navigation, sim.frame_ms, limit) {
        anyhow::bail!("Navigation to '{}' did not finish within {}ms", target, limit);
    }
    // One more frame so the tracker and indicator see the final position
    page.frame(sim.frame_ms);

    let state = page.indicator_state();
    if let Some(outcome) = navigation.outcome() {
        println!("Outcome:   {:?}", outcome);
    }
    println!("Scroll:    {:.0}px ({:.1}%)", page.scroll_y(), page.progress() * 100.0);
    println!("Active:    {}", state.active_section_id);
    println!(
        "Indicator: x {:.1}px, width {:.1}px",
        state.indicator_offset_px, state.indicator_width_px
    );
    Ok(())
}

fn cmd_content(table: Option<&str>) -> Result<()> {
    let value = match table {
        None => serde_json::json!({
            "personal": &registry::PERSONAL_INFO,
            "social": registry::SOCIAL_LINKS,
            "nav": registry::NAV_ITEMS,
            "skills": registry::SKILL_GROUPS,
            "education": registry::EDUCATION,
            "projects": registry::PROJECTS,
            "contact": registry::CONTACT_CHANNELS,
            "certifications": registry::CERTIFICATIONS,
            "site": &registry::SITE_CONFIG,
        }),
        Some("personal") => serde_json::to_value(&registry::PERSONAL_INFO)?,
        Some("social") => serde_json::to_value(&registry::SOCIAL_LINKS)?,
        Some("nav") => serde_json::to_value(&registry::NAV_ITEMS)?,
        Some("skills") => serde_json::to_value(&registry::SKILL_GROUPS)?,
        Some("tech") => serde_json::to_value(&registry::TECH_STACK)?,
        Some("about") => serde_json::to_value(&registry::ABOUT_FEATURES)?,
        Some("education") => serde_json::to_value(&registry::EDUCATION)?,
        Some("projects") => serde_json::to_value(&registry::PROJECTS)?,
        Some("contact") => serde_json::to_value(&registry::CONTACT_CHANNELS)?,
        Some("certifications") => serde_json::to_value(&registry::CERTIFICATIONS)?,
        Some("site") => serde_json::to_value(&registry::SITE_CONFIG)?,
        Some(other) => anyhow::bail!(
            "Unknown table '{}'. Valid tables: personal, social, nav, skills, tech, about, \
             education, projects, contact, certifications, site",
            other
        ),
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn cmd_icon(name: &str, size: f32) -> Result<()> {
    let icon: Icon = name.parse()?;
    println!("{}", to_svg(icon, size));
    Ok(())
}

fn cmd_theme(config: &FolioConfig, command: ThemeCommands) -> Result<()> {
    let path = &config.preferences.path;
    let store = PreferenceStore::open(path)
        .with_context(|| format!("Failed to open preferences at {}", path.display()))?;
    let mut theme = ThemeController::new(store, None);

    match command {
        ThemeCommands::Show => {}
        ThemeCommands::Toggle => {
            theme.toggle()?;
        }
        ThemeCommands::Set { scheme } => {
            let scheme: ColorScheme = scheme.parse()?;
            theme.set(scheme)?;
        }
        ThemeCommands::Clear => theme.clear_saved()?,
    }

    println!(
        "{} (meta {}{})",
        theme.scheme(),
        theme.meta_theme_color(),
        if theme.has_saved_preference() { ", saved" } else { "" }
    );
    Ok(())
}

fn cmd_contact(config: &FolioConfig, form: ContactForm, dry_run: bool) -> Result<()> {
    let credentials = config.contact.credentials.clone();

    if dry_run {
        form.validate()?;
        let payload = relay_payload(&credentials, &form)?;
        println!("POST {}", config.contact.endpoint);
        println!("{}", String::from_utf8_lossy(&payload));
        return Ok(());
    }

    let relay = HttpMailRelay::with_endpoint(config.contact.endpoint.clone())?;
    let mut controller = ContactController::new(relay, credentials);
    *controller.form_mut() = form;

    let outcome = controller.submit();
    for toast in controller.toasts().iter() {
        println!("[{:?}] {}", toast.kind, toast.message);
    }
    match outcome {
        SubmitOutcome::Sent => Ok(()),
        SubmitOutcome::NotConfigured => {
            warn!(
                "Set {}, {} and {} or fill the [contact] table",
                config::ENV_SERVICE_ID,
                config::ENV_TEMPLATE_ID,
                config::ENV_PUBLIC_KEY
            );
            anyhow::bail!("Contact relay is not configured")
        }
        other => anyhow::bail!("Message not sent ({:?})", other),
    }
}

fn cmd_info(config: &FolioConfig) -> Result<()> {
    let page = build_page(config)?;
    let document = page.document();
    let document = document.borrow();

    println!("Folio");
    println!("=====");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "Viewport: {:.0}x{:.0}, document {:.0}px",
        document.viewport_width(),
        document.viewport_height(),
        document.document_height()
    );
    println!(
        "Activation offset: {:.0}px, nav offset {:.0}px, resize debounce {:.0}ms",
        config.page.activation_offset, config.page.nav_offset, config.page.resize_debounce_ms
    );
    println!(
        "Progress bar: {}",
        if config.page.progress_bar { "on" } else { "off" }
    );
    println!();
    println!("Sections:");
    for section in &config.page.sections {
        let reveal = if section.animated {
            format!(
                "{} / {} (threshold {}, stagger {}s{})",
                section.reveal.preset,
                section.reveal.variant,
                section.reveal.threshold,
                section.reveal.stagger,
                if section.reveal.repeatable { "" } else { ", once" }
            )
        } else {
            "static".to_string()
        };
        println!("  - {:<12} {:>6.0}px  {}", section.id, section.height, reveal);
    }
    println!();
    println!(
        "Contact relay: {}",
        if config.contact.credentials.is_configured() {
            "configured"
        } else {
            "not configured"
        }
    );
    Ok(())
}
