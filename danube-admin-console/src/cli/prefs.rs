use anyhow::Result;
use clap::{Args, Subcommand};

use danube_admin_console::prefs::{Layout, NavState, Preferences, Theme, ThemeMode, NAV_TRANSITION};

use super::GlobalArgs;

#[derive(Debug, Args)]
pub struct Prefs {
    #[command(subcommand)]
    command: PrefsCommands,
}

#[derive(Debug, Subcommand)]
enum PrefsCommands {
    #[command(
        about = "Show or change the color theme",
        after_help = "Examples:
  danube-admin-console prefs theme
  danube-admin-console prefs theme toggle
  danube-admin-console prefs theme set dark"
    )]
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },
    #[command(
        about = "Show or change navigation expansion",
        after_help = "Examples:
  danube-admin-console prefs nav
  danube-admin-console prefs nav toggle --mobile"
    )]
    Nav {
        #[arg(long, global = true, default_value_t = false, help = "Use the mobile layout setting")]
        mobile: bool,
        #[command(subcommand)]
        command: Option<NavCommands>,
    },
}

#[derive(Debug, Subcommand)]
enum ThemeCommands {
    #[command(about = "Print the stored and effective theme")]
    Show,
    #[command(about = "Cycle light -> dark -> system")]
    Toggle,
    #[command(about = "Store a theme mode")]
    Set {
        #[arg(help = "light, dark or system")]
        mode: ThemeMode,
    },
}

#[derive(Debug, Subcommand)]
enum NavCommands {
    #[command(about = "Print whether the navigation is expanded")]
    Show,
    #[command(about = "Flip the expansion state")]
    Toggle,
    #[command(about = "Expand the navigation")]
    Expand,
    #[command(about = "Collapse the navigation")]
    Collapse,
}

pub async fn handle(prefs: Prefs, global: &GlobalArgs) -> Result<()> {
    let mut preferences = Preferences::open(global.prefs_path.clone());

    match prefs.command {
        PrefsCommands::Theme { command } => {
            let theme = &preferences.theme;
            match command.unwrap_or(ThemeCommands::Show) {
                ThemeCommands::Show => {}
                ThemeCommands::Toggle => {
                    theme.toggle()?;
                }
                ThemeCommands::Set { mode } => theme.set_mode(mode)?,
            }
            print_theme(theme);
        }
        PrefsCommands::Nav { mobile, command } => {
            let layout = if mobile { Layout::Mobile } else { Layout::Desktop };
            let nav = &mut preferences.nav;
            match command.unwrap_or(NavCommands::Show) {
                NavCommands::Show => {}
                NavCommands::Toggle => {
                    nav.toggle(layout)?;
                }
                NavCommands::Expand => nav.set_expanded(layout, true)?,
                NavCommands::Collapse => nav.set_expanded(layout, false)?,
            }
            if !nav.transition_complete() {
                tokio::time::sleep(NAV_TRANSITION).await;
            }
            print_nav(nav, layout);
        }
    }
    Ok(())
}

fn print_theme(theme: &Theme) {
    println!("{:<15} {}", "Mode:", theme.mode().to_string());
    println!("{:<15} {}", "Effective:", theme.resolved().to_string());
    println!("{:<15} {}", "System:", theme.system().current().to_string());
}

fn print_nav(nav: &NavState, layout: Layout) {
    let name = match layout {
        Layout::Desktop => "desktop",
        Layout::Mobile => "mobile",
    };
    println!("{:<15} {}", "Layout:", name);
    println!("{:<15} {}", "Expanded:", nav.is_expanded(layout));
    println!("{:<15} {}", "Labels:", if nav.labels_visible(layout) { "shown" } else { "hidden" });
}
