//! TeleGods CLI Client
//!
//! Interactive front-end for the TeleGods bank and liquor store.

use std::time::Duration;

use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::{fmt, EnvFilter};

use telegods::form;
use telegods::liquor::Catalogue;
use telegods::{ClientError, Config, ProtocolClient, Reply, Service, Session};

/// TeleGods CLI
#[derive(Parser, Debug)]
#[command(name = "telegods-cli")]
#[command(about = "Terminal client for the TeleGods bank and liquor store")]
#[command(version)]
struct Args {
    /// Server IP used when `connect` is given no address
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port used when `connect` is given no port
    #[arg(short, long, default_value = "8888")]
    port: String,

    /// Service to connect to on startup (bank or liquor_store)
    #[arg(short, long)]
    service: Option<Service>,

    /// Connect/read/write timeout in seconds
    #[arg(short, long, default_value = "3", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,
}

/// What the loop should do after a line
enum Flow {
    Continue,
    Exit,
}

struct Repl {
    client: ProtocolClient,
    editor: DefaultEditor,
    service: Option<Service>,
    session: Option<Session>,
}

impl Repl {
    fn new(client: ProtocolClient) -> rustyline::Result<Self> {
        Ok(Self {
            client,
            editor: DefaultEditor::new()?,
            service: None,
            session: None,
        })
    }

    fn run(&mut self) -> rustyline::Result<()> {
        println!("Welcome to TeleGods Client v{}", telegods::VERSION);
        println!("Type 'help' for commands, 'exit' to quit\n");

        loop {
            let prompt = self.prompt();
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    // History holds passwords otherwise
                    if !is_sensitive(line) {
                        let _ = self.editor.add_history_entry(line);
                    }

                    match self.execute(line) {
                        Ok(Flow::Continue) => {}
                        Ok(Flow::Exit) => break,
                        Err(e) => self.report_error(e),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("^D");
                    break;
                }
                Err(e) => {
                    tracing::error!("Readline error: {:?}", e);
                    self.client.disconnect();
                    return Err(e);
                }
            }
        }

        self.client.disconnect();
        Ok(())
    }

    fn prompt(&self) -> String {
        match (&self.service, &self.session) {
            (Some(service), Some(session)) => format!("{}({})> ", service, session.username),
            (Some(service), None) => format!("{}> ", service),
            _ => "telegods> ".to_string(),
        }
    }

    fn execute(&mut self, line: &str) -> Result<Flow, ClientError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let (command, args) = match parts.split_first() {
            Some((command, args)) => (*command, args),
            None => return Ok(Flow::Continue),
        };

        match command {
            "exit" | "quit" => {
                println!("Goodbye!");
                return Ok(Flow::Exit);
            }
            "help" => print_help(),
            "status" => self.print_status(),
            "connect" => self.connect(args)?,
            "disconnect" => {
                self.client.disconnect();
                self.service = None;
                self.session = None;
                println!("Disconnected");
            }
            "login" => self.login(args)?,
            "register" => self.register(args)?,
            "logout" => self.logout(),
            "balance" => self.balance()?,
            "deposit" => self.deposit(args)?,
            "withdraw" => self.withdraw(args)?,
            "transfer" => self.transfer(args)?,
            "chpasswd" => self.chpasswd(args)?,
            "list" => self.list()?,
            other => println!("Unknown command '{}', type 'help' for a list", other),
        }

        Ok(Flow::Continue)
    }

    // =========================================================================
    // Connection
    // =========================================================================

    fn connect(&mut self, args: &[&str]) -> Result<(), ClientError> {
        let service: Service = match args.first().map(|s| s.parse::<Service>()) {
            Some(Ok(service)) => service,
            Some(Err(e)) => {
                println!("{}", e);
                return Ok(());
            }
            None => {
                println!("Usage: connect <bank|liquor_store> [ip] [port]");
                return Ok(());
            }
        };

        let config = self.client.config();
        let host = config.host_or_default(args.get(1).copied().unwrap_or("")).to_string();
        let port = config.port_or_default(args.get(2).copied().unwrap_or("")).to_string();

        // Report both fields, like a form would
        let ip_check = self.client.validate_ip(&host);
        let port_check = self.client.validate_port(&port);
        if !ip_check.is_success() || !port_check.is_success() {
            for check in [ip_check, port_check] {
                if !check.is_success() {
                    print_reply_error(&check);
                }
            }
            return Ok(());
        }

        self.session = None;
        self.service = None;

        let reply = self.client.connect_to(service, &host, &port)?;
        if !reply.is_success() {
            print_reply_error(&reply);
            return Ok(());
        }

        self.service = Some(service);
        println!("Connected to {} at {}:{}", service, host, port);

        if service == Service::LiquorStore {
            self.list()?;
        }
        Ok(())
    }

    fn logout(&mut self) {
        if self.session.take().is_none() {
            println!("Not logged in");
            return;
        }
        self.client.logout();
        if !self.client.is_connected() {
            self.service = None;
            println!("Logged out (connection lost, use 'connect' again)");
        } else {
            println!("Logged out");
        }
    }

    // =========================================================================
    // Account
    // =========================================================================

    fn login(&mut self, args: &[&str]) -> Result<(), ClientError> {
        if !self.require_service(Service::Bank) {
            return Ok(());
        }
        let [username, password] = match args {
            [u, p] => [*u, *p],
            _ => {
                println!("Usage: login <username> <password>");
                return Ok(());
            }
        };

        let reply = self.client.login(username, password)?;
        match Session::from_login(username, &reply) {
            Some(session) => {
                println!("Welcome back {}, your UUID is {}", session.username, session.uuid);
                self.session = Some(session);
            }
            None => print_reply_error(&reply),
        }
        Ok(())
    }

    fn register(&mut self, args: &[&str]) -> Result<(), ClientError> {
        if !self.require_service(Service::Bank) {
            return Ok(());
        }
        let [username, password, confirmation] = match args {
            [u, p, c] => [*u, *p, *c],
            _ => {
                println!("Usage: register <username> <password> <confirm-password>");
                return Ok(());
            }
        };
        if let Err(e) = form::confirm_password(password, confirmation) {
            println!("{}", e);
            return Ok(());
        }

        let reply = self.client.register(username, password)?;
        if reply.is_success() {
            println!("Registered successfully, you can now log in");
        } else {
            print_reply_error(&reply);
        }
        Ok(())
    }

    /// Re-verify the old password with a login, then change it
    fn chpasswd(&mut self, args: &[&str]) -> Result<(), ClientError> {
        let Some(session) = self.require_session() else {
            return Ok(());
        };
        let [old, new, confirmation] = match args {
            [o, n, c] => [*o, *n, *c],
            _ => {
                println!("Usage: chpasswd <old-password> <new-password> <confirm-password>");
                return Ok(());
            }
        };
        if let Err(e) = form::confirm_password(new, confirmation) {
            println!("{}", e);
            return Ok(());
        }

        let verified = self.client.login(&session.username, old)?;
        let Some(session) = Session::from_login(session.username, &verified) else {
            print_reply_error(&verified);
            return Ok(());
        };

        let reply = self.client.chpasswd(&session.uuid, old, new)?;
        self.session = Some(session);
        if reply.is_success() {
            println!("Password changed successfully");
        } else {
            print_reply_error(&reply);
        }
        Ok(())
    }

    // =========================================================================
    // Money
    // =========================================================================

    fn balance(&mut self) -> Result<(), ClientError> {
        if self.require_session().is_none() {
            return Ok(());
        }
        let reply = self.client.balance()?;
        println!("Your current balance is: {}", reply.payload);
        Ok(())
    }

    fn deposit(&mut self, args: &[&str]) -> Result<(), ClientError> {
        let Some(session) = self.require_session() else {
            return Ok(());
        };
        let Some(amount) = amount_arg(args, 0, "deposit <amount>") else {
            return Ok(());
        };

        self.client.deposit(&session.uuid, amount)?;
        println!("Successfully deposited the amount into your account");
        Ok(())
    }

    fn withdraw(&mut self, args: &[&str]) -> Result<(), ClientError> {
        let Some(session) = self.require_session() else {
            return Ok(());
        };
        let Some(amount) = amount_arg(args, 0, "withdraw <amount>") else {
            return Ok(());
        };

        let reply = self.client.withdraw(&session.uuid, amount)?;
        if reply.is_success() {
            println!("Successfully withdrew the amount from your account");
        } else {
            print_reply_error(&reply);
        }
        Ok(())
    }

    fn transfer(&mut self, args: &[&str]) -> Result<(), ClientError> {
        let Some(session) = self.require_session() else {
            return Ok(());
        };
        let Some(recipient) = args.first().copied().filter(|r| !r.is_empty()) else {
            println!("Usage: transfer <recipient-uuid> <amount>");
            return Ok(());
        };
        let Some(amount) = amount_arg(args, 1, "transfer <recipient-uuid> <amount>") else {
            return Ok(());
        };

        let reply = self.client.transfer(&session.uuid, recipient, amount)?;
        if reply.is_success() {
            println!("Successfully transferred the amount to {}", recipient);
        } else {
            print_reply_error(&reply);
        }
        Ok(())
    }

    // =========================================================================
    // Liquor Store
    // =========================================================================

    fn list(&mut self) -> Result<(), ClientError> {
        if !self.require_service(Service::LiquorStore) {
            return Ok(());
        }
        let reply = self.client.list_liquors()?;
        if !reply.is_success() {
            print_reply_error(&reply);
            return Ok(());
        }

        let catalogue = Catalogue::parse(&reply.payload)?;
        println!("Welcome to TeleGods Liquor Store, choose your poison!");
        println!(
            "{} customers connected, owner {}\n",
            catalogue.connected_users, catalogue.owner_uuid
        );
        if catalogue.is_empty() {
            println!("  (the shelves are empty)");
        }
        for liquor in &catalogue.liquors {
            println!("  {}", liquor.commercial_name);
            println!("    Brought with delicacy from {}", liquor.origin);
            println!("    {} units left in stock", liquor.stock);
            println!("    {} TC   [{}]", liquor.price, liquor.uuid);
        }
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn require_service(&self, service: Service) -> bool {
        if self.service == Some(service) && self.client.is_connected() {
            return true;
        }
        println!("Not connected to the {}, use 'connect {}' first", service, service);
        false
    }

    fn require_session(&self) -> Option<Session> {
        if !self.require_service(Service::Bank) {
            return None;
        }
        if self.session.is_none() {
            println!("Not logged in, use 'login' first");
        }
        self.session.clone()
    }

    fn report_error(&mut self, error: ClientError) {
        match error.code() {
            Some(code) => println!("Error: {} ({})", code, error),
            None => println!("Error: {}", error),
        }
        if !self.client.is_connected() {
            self.service = None;
            self.session = None;
        }
    }

    fn print_status(&self) {
        match (self.service, self.client.endpoint()) {
            (Some(service), Some(endpoint)) if self.client.is_connected() => {
                println!("Connected to {} at {}", service, endpoint)
            }
            _ => println!("Disconnected"),
        }
        match &self.session {
            Some(session) => println!("Logged in as {} ({})", session.username, session.uuid),
            None => println!("Not logged in"),
        }
    }
}

/// Extract and check an amount argument
fn amount_arg<'a>(args: &[&'a str], index: usize, usage: &str) -> Option<&'a str> {
    let amount = args.get(index).copied().unwrap_or("");
    if let Err(e) = form::require_filled(&[amount]).and_then(|_| form::positive_amount(amount)) {
        println!("{}", e);
        println!("Usage: {}", usage);
        return None;
    }
    Some(amount)
}

fn is_sensitive(line: &str) -> bool {
    matches!(
        line.split_whitespace().next(),
        Some("login" | "register" | "chpasswd")
    )
}

fn print_reply_error(reply: &Reply) {
    match reply.code.description() {
        Some(text) => println!("{}", text),
        None => println!("Server reported error code {}", reply.code.0),
    }
}

fn print_help() {
    println!("Connection:");
    println!("  connect <bank|liquor_store> [ip] [port]   Connect to a service");
    println!("  disconnect                                Close the connection");
    println!("  status                                    Show connection and login state");
    println!("Bank:");
    println!("  register <user> <password> <confirm>      Create an account");
    println!("  login <user> <password>                   Log in");
    println!("  balance                                   Show your balance");
    println!("  deposit <amount>                          Deposit funds");
    println!("  withdraw <amount>                         Withdraw money");
    println!("  transfer <recipient-uuid> <amount>        Transfer funds");
    println!("  chpasswd <old> <new> <confirm>            Change your password");
    println!("  logout                                    Log out");
    println!("Liquor store:");
    println!("  list                                      Show the catalogue");
    println!("  exit, quit                                Leave the client");
}

fn main() {
    // Logs go to stderr so they don't interleave with the prompt
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,telegods=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("TeleGods Client v{}", telegods::VERSION);

    let config = Config::builder()
        .timeout(Duration::from_secs(args.timeout))
        .default_host(&args.host)
        .default_port(&args.port)
        .build();

    let client = ProtocolClient::new(config);
    let mut repl = match Repl::new(client) {
        Ok(repl) => repl,
        Err(e) => {
            tracing::error!("Failed to start line editor: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(service) = args.service {
        let line = format!("connect {}", service);
        if let Err(e) = repl.execute(&line) {
            repl.report_error(e);
        }
    }

    if let Err(e) = repl.run() {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
