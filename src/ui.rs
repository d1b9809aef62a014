// UI layer: interactive menu using `dialoguer`, backed by the monkey
// provider. Screens are drawn synchronously; each provider call runs on the
// tokio runtime owned by the session, behind a spinner, and can be
// cancelled with Ctrl-C.

use crate::art;
use crate::error::ProviderError;
use crate::model::Monkey;
use crate::provider::MonkeyProvider;
use anyhow::{Context, Result};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::io::stdout;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const NAME_WIDTH: usize = 25;
const LOCATION_WIDTH: usize = 30;
const POPULATION_WIDTH: usize = 12;

const MENU_ITEMS: [&str; 4] = [
    "List all monkeys",
    "Get details for a specific monkey by name",
    "Get a random monkey",
    "Exit app",
];

/// A running console session: the provider plus the runtime its async
/// calls execute on.
pub struct Session {
    provider: MonkeyProvider,
    runtime: Runtime,
}

impl Session {
    pub fn new(provider: MonkeyProvider) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;
        Ok(Session { provider, runtime })
    }

    /// Run `call` with a fresh cancellation token and a spinner. Ctrl-C
    /// cancels the token; the call's own result is still returned.
    fn run<'a, T, F, Fut>(&'a self, message: &'static str, call: F) -> Result<T, ProviderError>
    where
        F: FnOnce(&'a MonkeyProvider, CancellationToken) -> Fut,
        Fut: Future<Output = Result<T, ProviderError>> + 'a,
    {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));

        let token = CancellationToken::new();
        // Once registered, tokio keeps its SIGINT handler for the process
        // lifetime. Menu prompts still quit on Ctrl-C since dialoguer reads
        // raw keys.
        let interrupt = self.runtime.spawn({
            let token = token.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    debug!("ctrl-c received, cancelling request");
                    token.cancel();
                }
            }
        });
        let result = self.runtime.block_on(call(&self.provider, token));
        interrupt.abort();
        spinner.finish_and_clear();
        result
    }
}

/// Main interactive menu. Loops until the user picks "Exit app".
pub fn main_menu(session: Session) -> Result<()> {
    loop {
        clear_screen()?;
        print_banner();
        print_header();
        let selection = Select::new()
            .with_prompt("Select an option")
            .items(&MENU_ITEMS)
            .default(0)
            .interact()?;
        match selection {
            0 => handle_list_all(&session)?,
            1 => handle_get_by_name(&session)?,
            2 => handle_random(&session)?,
            _ => {
                println!("Goodbye!");
                return Ok(());
            }
        }
    }
}

fn handle_list_all(session: &Session) -> Result<()> {
    let result = session.run("Loading monkeys...", |p, token| async move {
        p.fetch_all(&token).await
    });
    clear_screen()?;
    print_banner();
    match result {
        Ok(monkeys) => {
            println!("All available monkeys:\n");
            print!("{}", render_table(&monkeys));
        }
        Err(e) => report_failure(&e),
    }
    wait_for_enter()
}

fn handle_get_by_name(session: &Session) -> Result<()> {
    let input: String = Input::new()
        .with_prompt("Enter monkey name")
        .allow_empty(true)
        .interact_text()?;
    if input.trim().is_empty() {
        println!("Name was empty.");
        return wait_for_enter();
    }

    let result = session.run("Searching...", |p, token| {
        let name = input.clone();
        async move { p.find_by_name(&name, &token).await }
    });
    clear_screen()?;
    print_banner();
    match result {
        Ok(Some(monkey)) => print!("{}", render_details(&monkey)),
        Ok(None) => println!("No monkey found with name '{}'.", input),
        Err(e) => report_failure(&e),
    }
    wait_for_enter()
}

fn handle_random(session: &Session) -> Result<()> {
    let result = session.run("Picking a monkey...", |p, token| async move {
        p.pick_random(&token).await
    });
    clear_screen()?;
    print_banner();
    match result {
        Ok(pick) => {
            println!("Randomly selected monkey:\n");
            print!("{}", render_details(&pick.monkey));
            println!();
            println!("Random pick count: {}", pick.count);
        }
        Err(e) => report_failure(&e),
    }
    wait_for_enter()
}

fn report_failure(err: &ProviderError) {
    match err {
        ProviderError::Cancelled => println!("Request cancelled."),
        ProviderError::EmptyDataset => println!("No monkeys available."),
    }
}

/// Fixed-width table of all monkeys, or a notice when there are none.
pub fn render_table(monkeys: &[Monkey]) -> String {
    if monkeys.is_empty() {
        return "No monkeys available.\n".to_string();
    }
    let mut out = format!(
        "{:<NAME_WIDTH$} | {:<LOCATION_WIDTH$} | {:<POPULATION_WIDTH$}\n",
        "Name", "Location", "Population"
    );
    out.push_str(&"-".repeat(NAME_WIDTH + LOCATION_WIDTH + POPULATION_WIDTH + 6));
    out.push('\n');
    for m in monkeys {
        out.push_str(&format!(
            "{:<NAME_WIDTH$} | {:<LOCATION_WIDTH$} | {:<POPULATION_WIDTH$}\n",
            m.name(),
            m.location(),
            m.population()
        ));
    }
    out
}

/// Name, location and population, one per line.
pub fn render_details(monkey: &Monkey) -> String {
    format!(
        "Name: {}\nLocation: {}\nPopulation: {}\n",
        monkey.name(),
        monkey.location(),
        monkey.population()
    )
}

fn print_header() {
    println!("=== Monkey Console App ===");
    println!();
}

fn print_banner() {
    if let Some(banner) = art::maybe_banner(&mut rand::thread_rng()) {
        println!("{}\n", banner);
    }
}

fn clear_screen() -> Result<()> {
    execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0)).context("Failed to clear terminal")?;
    Ok(())
}

fn wait_for_enter() -> Result<()> {
    println!();
    let _: String = Input::new()
        .with_prompt("Press Enter to return to menu")
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}
