//! Command definitions
//!
//! Represents requests sent to a service.

use std::fmt;
use std::str::FromStr;

use crate::error::ClientError;

/// Command verbs as they appear on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Probe,
    Login,
    Register,
    Logout,
    Balance,
    Deposit,
    Withdraw,
    Transfer,
    ChangePassword,
    List,
}

impl Verb {
    /// Wire spelling of the verb
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Probe => "CONNECT",
            Verb::Login => "LOGIN",
            Verb::Register => "REGISTER",
            Verb::Logout => "LOGOUT",
            Verb::Balance => "BALANCE",
            Verb::Deposit => "DEPOSIT",
            Verb::Withdraw => "WITH",
            Verb::Transfer => "TRANSFER",
            Verb::ChangePassword => "CHPASSWD",
            Verb::List => "LIST",
        }
    }

    /// Number of arguments the verb carries
    pub fn arity(self) -> usize {
        match self {
            Verb::Probe | Verb::Logout | Verb::Balance | Verb::List => 0,
            Verb::Login | Verb::Register | Verb::Deposit | Verb::Withdraw => 2,
            Verb::Transfer | Verb::ChangePassword => 3,
        }
    }
}

impl FromStr for Verb {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let verb = match s {
            "CONNECT" => Verb::Probe,
            "LOGIN" => Verb::Login,
            "REGISTER" => Verb::Register,
            "LOGOUT" => Verb::Logout,
            "BALANCE" => Verb::Balance,
            "DEPOSIT" => Verb::Deposit,
            "WITH" => Verb::Withdraw,
            "TRANSFER" => Verb::Transfer,
            "CHPASSWD" => Verb::ChangePassword,
            "LIST" => Verb::List,
            other => {
                return Err(ClientError::MalformedRequest(format!(
                    "unknown verb: {:?}",
                    other
                )))
            }
        };
        Ok(verb)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to a service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Connection probe (service identification)
    Probe,

    /// Authenticate and obtain a session UUID
    Login { username: String, password: String },

    /// Create an account
    Register { username: String, password: String },

    /// End the current session
    Logout,

    /// Query the balance of the logged-in account
    Balance,

    /// Add funds
    Deposit { uuid: String, amount: String },

    /// Remove funds
    Withdraw { uuid: String, amount: String },

    /// Move funds to another account
    Transfer {
        sender: String,
        recipient: String,
        amount: String,
    },

    /// Replace the account password
    ChangePassword {
        uuid: String,
        old_password: String,
        new_password: String,
    },

    /// Fetch the liquor store catalogue
    List,
}

impl Command {
    /// Get the command verb
    pub fn verb(&self) -> Verb {
        match self {
            Command::Probe => Verb::Probe,
            Command::Login { .. } => Verb::Login,
            Command::Register { .. } => Verb::Register,
            Command::Logout => Verb::Logout,
            Command::Balance => Verb::Balance,
            Command::Deposit { .. } => Verb::Deposit,
            Command::Withdraw { .. } => Verb::Withdraw,
            Command::Transfer { .. } => Verb::Transfer,
            Command::ChangePassword { .. } => Verb::ChangePassword,
            Command::List => Verb::List,
        }
    }

    /// Arguments in wire order
    pub fn args(&self) -> Vec<&str> {
        match self {
            Command::Probe | Command::Logout | Command::Balance | Command::List => Vec::new(),
            Command::Login { username, password } | Command::Register { username, password } => {
                vec![username.as_str(), password.as_str()]
            }
            Command::Deposit { uuid, amount } | Command::Withdraw { uuid, amount } => {
                vec![uuid.as_str(), amount.as_str()]
            }
            Command::Transfer {
                sender,
                recipient,
                amount,
            } => vec![sender.as_str(), recipient.as_str(), amount.as_str()],
            Command::ChangePassword {
                uuid,
                old_password,
                new_password,
            } => vec![uuid.as_str(), old_password.as_str(), new_password.as_str()],
        }
    }

    /// Build a command from a verb and its arguments
    pub fn from_parts(verb: Verb, args: Vec<String>) -> crate::Result<Self> {
        if args.len() != verb.arity() {
            return Err(ClientError::MalformedRequest(format!(
                "{} expects {} arguments, got {}",
                verb,
                verb.arity(),
                args.len()
            )));
        }

        let mut args = args.into_iter();
        let mut next = || args.next().unwrap_or_default();

        let command = match verb {
            Verb::Probe => Command::Probe,
            Verb::Logout => Command::Logout,
            Verb::Balance => Command::Balance,
            Verb::List => Command::List,
            Verb::Login => Command::Login {
                username: next(),
                password: next(),
            },
            Verb::Register => Command::Register {
                username: next(),
                password: next(),
            },
            Verb::Deposit => Command::Deposit {
                uuid: next(),
                amount: next(),
            },
            Verb::Withdraw => Command::Withdraw {
                uuid: next(),
                amount: next(),
            },
            Verb::Transfer => Command::Transfer {
                sender: next(),
                recipient: next(),
                amount: next(),
            },
            Verb::ChangePassword => Command::ChangePassword {
                uuid: next(),
                old_password: next(),
                new_password: next(),
            },
        };

        Ok(command)
    }
}
