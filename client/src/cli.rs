//! # Command-Line Front End
//!
//! One subcommand per user operation. Every command goes through the same
//! forms and stores an interactive front end would use, so validation,
//! error messages, and refresh rules are identical.
//!
//! `interactive` keeps the sync task running and re-renders whenever the
//! store changes.

use chrono::Utc;
use clap::{Parser, Subcommand};
use shared::{format_currency, MoneyRepo, Transfer, TransferType};
use std::io::{self, BufRead, Write};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::app::App;
use crate::core::error::{AppError, Result};
use crate::forms::{AccountForm, LoginForm, RegistrationForm, RegistrationOutcome, TransferForm};
use crate::state::Selection;
use crate::views::{selection_history, BalanceSummary};

const FALLBACK_CURRENCY: &str = "EUR";

/// Personal finance client for the money-repo API.
#[derive(Parser, Debug)]
#[command(name = "moneyrepo", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and keep the token for later commands.
    Login {
        username: String,
        /// Read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored token.
    Logout,
    /// Create a user and log in.
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        /// Read from stdin (twice) when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Show the logged-in user.
    Whoami,
    /// List accounts.
    Accounts,
    /// Show transfers and balance of one account or of all accounts.
    Show {
        /// Account name; all accounts when omitted.
        #[arg(short, long)]
        account: Option<String>,
        /// Also print the running balance per day.
        #[arg(long)]
        history: bool,
    },
    /// Create an account.
    AddAccount {
        name: String,
        #[arg(long, default_value = "0")]
        start_balance: String,
        /// YYYY-MM-DD, today when omitted.
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long, default_value = FALLBACK_CURRENCY)]
        currency: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Change an account. Omitted fields keep their value.
    EditAccount {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        start_balance: Option<String>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an account and its transfers.
    DeleteAccount { id: i64 },
    /// Add an income or expense to an account.
    AddTransfer {
        /// Account name
        account: String,
        amount: String,
        /// `income` or `expense`
        #[arg(long = "type", default_value = "expense")]
        transfer_type: TransferType,
        #[arg(long)]
        description: String,
        /// YYYY-MM-DD, today when omitted.
        #[arg(long)]
        date: Option<String>,
    },
    /// Change a transfer. Omitted fields keep their value.
    EditTransfer {
        /// Account name
        account: String,
        id: i64,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long = "type")]
        transfer_type: Option<TransferType>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a transfer.
    DeleteTransfer {
        /// Account name
        account: String,
        id: i64,
    },
    /// Keep a live view open; type `help` for commands.
    Interactive,
}

impl Command {
    /// Subcommand name for logs; arguments may hold a password
    pub fn name(&self) -> &'static str {
        match self {
            Command::Login { .. } => "login",
            Command::Logout => "logout",
            Command::Register { .. } => "register",
            Command::Whoami => "whoami",
            Command::Accounts => "accounts",
            Command::Show { .. } => "show",
            Command::AddAccount { .. } => "add-account",
            Command::EditAccount { .. } => "edit-account",
            Command::DeleteAccount { .. } => "delete-account",
            Command::AddTransfer { .. } => "add-transfer",
            Command::EditTransfer { .. } => "edit-transfer",
            Command::DeleteTransfer { .. } => "delete-transfer",
            Command::Interactive => "interactive",
        }
    }
}

/// Execute one command.
pub async fn run(cli: Cli, app: &App) -> Result<()> {
    debug!(command = cli.command.name(), "Running command");
    match cli.command {
        Command::Login { username, password } => login(app, username, password).await,
        Command::Logout => {
            app.logout();
            println!("Logged out.");
            Ok(())
        }
        Command::Register {
            first_name,
            last_name,
            email,
            username,
            password,
        } => {
            let (password, password_confirm) = match password {
                Some(p) => (p.clone(), p),
                None => (prompt("Password: ")?, prompt("Repeat password: ")?),
            };
            let mut form = RegistrationForm {
                first_name,
                last_name,
                email,
                username,
                password,
                password_confirm,
                ..RegistrationForm::default()
            };
            match form.submit(app.api.as_ref(), &app.auth).await? {
                RegistrationOutcome::LoggedIn => println!("Registered and logged in."),
                RegistrationOutcome::SwitchToLogin => {
                    println!("Registered. Automatic login failed, please run `moneyrepo login`.")
                }
            }
            Ok(())
        }
        Command::Whoami => {
            require_login(app)?;
            app.user.request_user_info().await;
            let info = app.user.user_info();
            if info.is_empty() {
                println!("No profile available.");
            } else {
                println!("{} <{}>", app.user.display_name(), info.email);
            }
            Ok(())
        }
        Command::Accounts => {
            require_login(app)?;
            app.repos.request_repos().await;
            print_accounts(&app.repos.repos());
            Ok(())
        }
        Command::Show { account, history } => {
            require_login(app)?;
            app.repos.request_repos().await;
            let selection = account.map(Selection::Account).unwrap_or_default();
            if let Selection::Account(name) = &selection {
                resolve_account(app, name)?;
            }
            app.repos.select_account(selection);
            app.repos.refresh_selection().await;
            print_selection(app, history);
            Ok(())
        }
        Command::AddAccount {
            name,
            start_balance,
            start_date,
            currency,
            description,
        } => {
            require_login(app)?;
            let mut form = AccountForm {
                repo_name: name,
                description,
                start_balance,
                start_balance_date: start_date.unwrap_or_else(today),
                currency,
                ..AccountForm::create()
            };
            let repo = form.submit(&app.repos).await?;
            println!("Created account #{} {}.", repo.id, repo.repo_name);
            Ok(())
        }
        Command::EditAccount {
            id,
            name,
            start_balance,
            start_date,
            currency,
            description,
        } => {
            require_login(app)?;
            app.repos.request_repos().await;
            let existing = app
                .repos
                .repos()
                .into_iter()
                .find(|r| r.id == id)
                .ok_or_else(|| AppError::Validation(format!("Unknown account #{}", id)))?;

            let mut form = AccountForm::edit(&existing);
            override_with(&mut form.repo_name, name);
            override_with(&mut form.start_balance, start_balance);
            override_with(&mut form.start_balance_date, start_date);
            override_with(&mut form.currency, currency);
            override_with(&mut form.description, description);

            let repo = form.submit(&app.repos).await?;
            println!("Updated account #{} {}.", repo.id, repo.repo_name);
            Ok(())
        }
        Command::DeleteAccount { id } => {
            require_login(app)?;
            app.repos.request_repos().await;
            app.repos.delete_account(id).await?;
            println!("Deleted account #{}.", id);
            Ok(())
        }
        Command::AddTransfer {
            account,
            amount,
            transfer_type,
            description,
            date,
        } => {
            require_login(app)?;
            app.repos.request_repos().await;
            let repo_id = resolve_account(app, &account)?;
            app.repos.select_account(Selection::Account(account));

            let mut form = new_transfer_form(repo_id, amount, transfer_type, description, date);
            let transfer = form.submit(&app.repos).await?;
            println!("Created transfer #{}.", transfer.id);
            print_balance(app);
            Ok(())
        }
        Command::EditTransfer {
            account,
            id,
            amount,
            transfer_type,
            description,
            date,
        } => {
            require_login(app)?;
            app.repos.request_repos().await;
            resolve_account(app, &account)?;
            app.repos.select_account(Selection::Account(account));
            app.repos.refresh_selection().await;
            let existing = app
                .repos
                .transfers()
                .into_iter()
                .find(|t| t.id == id)
                .ok_or_else(|| AppError::Validation(format!("Unknown transfer #{}", id)))?;

            let mut form = TransferForm::edit(&existing);
            override_with(&mut form.amount, amount);
            override_with(&mut form.description, description);
            override_with(&mut form.date, date);
            if let Some(transfer_type) = transfer_type {
                form.transfer_type = transfer_type;
            }

            let transfer = form.submit(&app.repos).await?;
            println!("Updated transfer #{}.", transfer.id);
            print_balance(app);
            Ok(())
        }
        Command::DeleteTransfer { account, id } => {
            require_login(app)?;
            app.repos.request_repos().await;
            let repo_id = resolve_account(app, &account)?;
            app.repos.select_account(Selection::Account(account));
            app.repos.delete_transfer(repo_id, id).await?;
            println!("Deleted transfer #{}.", id);
            print_balance(app);
            Ok(())
        }
        Command::Interactive => {
            require_login(app)?;
            interactive(app).await
        }
    }
}

async fn login(app: &App, username: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt("Password: ")?,
    };
    let mut form = LoginForm {
        username,
        password,
        ..LoginForm::default()
    };
    form.submit(&app.auth, app.api.as_ref()).await?;
    println!("Logged in.");
    Ok(())
}

// ========== Interactive Mode ==========

const INTERACTIVE_HELP: &str = "\
commands:
  select <name>   show one account
  all             show all accounts
  accounts        list accounts
  history         print the balance history
  refresh         refetch everything
  help            this text
  quit            leave";

async fn interactive(app: &App) -> Result<()> {
    let _sync = app.start_sync();
    let mut updates = app.repos.subscribe_updates();
    let mut auth_rx = app.auth.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    info!("Interactive session started");
    println!("{}", INTERACTIVE_HELP);
    app.user.request_user_info().await;

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                updates.borrow_and_update();
                print_selection(app, false);
            }
            changed = auth_rx.changed() => {
                if changed.is_err() || auth_rx.borrow_and_update().is_none() {
                    println!("Session ended, please log in again.");
                    break;
                }
            }
            line = lines.next_line() => {
                let line = line.map_err(|e| AppError::State(format!("Failed to read input: {}", e)))?;
                let Some(line) = line else { break };
                let mut words = line.split_whitespace();
                match (words.next(), words.collect::<Vec<_>>().join(" ")) {
                    (Some("select"), name) if !name.is_empty() => {
                        if app.repos.repo_id_for(&name).is_none() {
                            println!("Unknown account: {}", name);
                        }
                        app.repos.select_account(Selection::Account(name));
                    }
                    (Some("all"), _) => app.repos.select_account(Selection::All),
                    (Some("accounts"), _) => print_accounts(&app.repos.repos()),
                    (Some("history"), _) => print_history(app),
                    (Some("refresh"), _) => {
                        app.repos.request_repos().await;
                        app.repos.refresh_selection().await;
                    }
                    (Some("quit" | "exit"), _) => break,
                    (None, _) => {}
                    _ => println!("{}", INTERACTIVE_HELP),
                }
            }
        }
    }

    info!("Interactive session ended");
    Ok(())
}

// ========== Helpers ==========

fn require_login(app: &App) -> Result<()> {
    if !app.auth.is_authenticated() {
        return Err(AppError::State(
            "Not logged in. Run `moneyrepo login <username>` first.".to_string(),
        ));
    }
    Ok(())
}

fn resolve_account(app: &App, name: &str) -> Result<i64> {
    app.repos
        .repo_id_for(name)
        .ok_or_else(|| AppError::Validation(format!("Unknown account: {}", name)))
}

fn new_transfer_form(
    repo_id: i64,
    amount: String,
    transfer_type: TransferType,
    description: String,
    date: Option<String>,
) -> TransferForm {
    let mut form = TransferForm::create(Some(repo_id));
    form.amount = amount;
    form.transfer_type = transfer_type;
    form.description = description;
    form.date = date.unwrap_or_else(today);
    form
}

fn override_with(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

fn prompt(label: &str) -> Result<String> {
    let read = || -> io::Result<String> {
        print!("{}", label);
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    };
    read().map_err(|e| AppError::State(format!("Failed to read input: {}", e)))
}

/// Currency of the selected account, or of the first account for "all"
fn display_currency(app: &App) -> String {
    app.repos
        .selected_repo()
        .or_else(|| app.repos.repos().into_iter().next())
        .map(|r| r.currency)
        .unwrap_or_else(|| FALLBACK_CURRENCY.to_string())
}

fn print_accounts(repos: &[MoneyRepo]) {
    if repos.is_empty() {
        println!("No accounts.");
        return;
    }
    for repo in repos {
        println!(
            "#{:<4} {:<20} {:>16}  since {}  {}",
            repo.id,
            repo.repo_name,
            format_currency(repo.start_balance, &repo.currency),
            repo.start_balance_date,
            repo.description
        );
    }
}

fn print_transfers(transfers: &[Transfer], currency: &str) {
    if transfers.is_empty() {
        println!("No transfers.");
        return;
    }
    for t in transfers {
        println!(
            "#{:<4} {}  {:>16}  {}",
            t.id,
            t.timestamp.format("%d.%m.%Y"),
            format_currency(t.signed_amount(), currency),
            t.description
        );
    }
}

fn print_balance(app: &App) {
    let summary = BalanceSummary::new(app.repos.balance());
    println!("Balance: {}", summary.display(&display_currency(app)));
}

fn print_history(app: &App) {
    let currency = display_currency(app);
    for point in selection_history(&app.repos) {
        println!("{}  {:>16}", point.label(), format_currency(point.balance, &currency));
    }
}

fn print_selection(app: &App, history: bool) {
    let currency = display_currency(app);
    println!("== {} ==", app.repos.selection());
    print_transfers(&app.repos.transfers(), &currency);
    print_balance(app);
    if history {
        print_history(app);
    }
}
