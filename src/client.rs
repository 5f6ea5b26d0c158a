//! Protocol Client
//!
//! One method per remote operation, each producing a [`Reply`].
//!
//! ## Request Pattern
//! 1. Encode the command
//! 2. Write it fully to the socket
//! 3. Block for exactly one response line
//! 4. Decode it and map the status to a result code
//!
//! Every network operation takes `&mut self`, so a client can never have
//! two requests in flight. `Err` is reserved for conditions with no numeric
//! code: transport failures after connect and malformed responses.

use crate::catalog::{ErrorCode, Reply};
use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::network::{self, ConnectionManager, Endpoint};
use crate::protocol::{Command, Response};
use crate::session::Service;

/// Client for the bank and liquor store services
pub struct ProtocolClient {
    connection: ConnectionManager,
}

impl ProtocolClient {
    /// Create a disconnected client
    pub fn new(config: Config) -> Self {
        Self {
            connection: ConnectionManager::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        self.connection.config()
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// Last endpoint passed to `connect`
    pub fn endpoint(&self) -> Option<Endpoint> {
        self.connection.endpoint()
    }

    // =========================================================================
    // Local Validation
    // =========================================================================

    /// `(0, "")` for an IP literal, `(128, "")` otherwise
    pub fn validate_ip(&self, host: &str) -> Reply {
        network::validate_ip(host).into()
    }

    /// `(0, "")` for a port in `[1, 65535]`, `(129, "")` otherwise
    pub fn validate_port(&self, port: &str) -> Reply {
        network::validate_port(port).into()
    }

    // =========================================================================
    // Connection Lifecycle
    // =========================================================================

    /// Connect and probe; the payload is the announced service name
    pub fn connect(&mut self, host: &str, port: &str) -> Result<Reply> {
        self.connection.connect(host, port)
    }

    /// Connect and require the peer to be `service`
    ///
    /// A peer announcing a different service is treated as a refused
    /// connection (130) and disconnected.
    pub fn connect_to(&mut self, service: Service, host: &str, port: &str) -> Result<Reply> {
        let reply = self.connect(host, port)?;
        if !reply.is_success() {
            return Ok(reply);
        }

        if !service.matches(&reply.payload) {
            tracing::warn!(
                "Expected {} but peer announced {:?}",
                service,
                reply.payload
            );
            self.connection.disconnect();
            return Ok(Reply::failure(ErrorCode::CONNECTION_REFUSED));
        }

        Ok(reply)
    }

    /// Close the connection; always `(0, "")`
    pub fn disconnect(&mut self) -> Reply {
        self.connection.disconnect();
        Reply::success()
    }

    // =========================================================================
    // Account Operations
    // =========================================================================

    /// `OK <uuid>` gives `(0, uuid)`
    pub fn login(&mut self, username: &str, password: &str) -> Result<Reply> {
        let response = self.connection.request(&Command::Login {
            username: username.to_string(),
            password: password.to_string(),
        })?;

        if response.is_ok() {
            let uuid = response.first().ok_or_else(|| {
                ClientError::MalformedResponse("login reply without a UUID".to_string())
            })?;
            tracing::debug!("Logged in as {}", username);
            return Ok(Reply::with_payload(uuid));
        }

        failure(&response)
    }

    pub fn register(&mut self, username: &str, password: &str) -> Result<Reply> {
        let response = self.connection.request(&Command::Register {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        status_only(&response)
    }

    /// End the session
    ///
    /// The bank desynchronizes when two logout cycles share one TCP
    /// connection, so every logout is followed by a reconnect to the same
    /// endpoint. Neither the send nor the reconnect can fail this call.
    pub fn logout(&mut self) -> Reply {
        if let Err(e) = self.connection.send(&Command::Logout) {
            tracing::warn!("LOGOUT not sent: {}", e);
        }

        match self.connection.reconnect() {
            Ok(reply) if reply.is_success() => {
                tracing::debug!("Reconnected after logout");
            }
            Ok(reply) => {
                tracing::warn!("Reconnect after logout failed with code {}", reply.code.0);
            }
            Err(e) => {
                tracing::warn!("Reconnect after logout failed: {}", e);
            }
        }

        Reply::success()
    }

    pub fn chpasswd(&mut self, uuid: &str, old_password: &str, new_password: &str) -> Result<Reply> {
        let response = self.connection.request(&Command::ChangePassword {
            uuid: uuid.to_string(),
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        })?;
        status_only(&response)
    }

    // =========================================================================
    // Money Operations
    // =========================================================================

    /// Current balance as sent by the bank
    ///
    /// The bank has no failure reply for this call; the amount is the
    /// token after the status.
    pub fn balance(&mut self) -> Result<Reply> {
        let response = self.connection.request(&Command::Balance)?;
        let amount = response.first().ok_or_else(|| {
            ClientError::MalformedResponse("balance reply without an amount".to_string())
        })?;
        Ok(Reply::with_payload(amount))
    }

    /// Deposits cannot fail on the bank side; the reply is read and ignored
    pub fn deposit(&mut self, uuid: &str, amount: &str) -> Result<Reply> {
        let response = self.connection.request(&Command::Deposit {
            uuid: uuid.to_string(),
            amount: amount.to_string(),
        })?;
        if !response.is_ok() {
            tracing::debug!("Ignoring deposit reply {:?}", response.status);
        }
        Ok(Reply::success())
    }

    /// Notably fails with 3 (insufficient funds)
    pub fn withdraw(&mut self, uuid: &str, amount: &str) -> Result<Reply> {
        let response = self.connection.request(&Command::Withdraw {
            uuid: uuid.to_string(),
            amount: amount.to_string(),
        })?;
        status_only(&response)
    }

    /// Notably fails with 3 (insufficient funds) or 252 (unknown recipient)
    pub fn transfer(&mut self, sender: &str, recipient: &str, amount: &str) -> Result<Reply> {
        let response = self.connection.request(&Command::Transfer {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            amount: amount.to_string(),
        })?;
        status_only(&response)
    }

    // =========================================================================
    // Liquor Store
    // =========================================================================

    /// Raw catalogue JSON; see [`crate::liquor::Catalogue::parse`]
    pub fn list_liquors(&mut self) -> Result<Reply> {
        let response = self.connection.request(&Command::List)?;
        if response.is_ok() {
            return Ok(Reply::with_payload(response.body));
        }
        failure(&response)
    }
}

/// `OK` gives `(0, "")`, anything else `(code, "")`
fn status_only(response: &Response) -> Result<Reply> {
    if response.is_ok() {
        return Ok(Reply::success());
    }
    failure(response)
}

/// Extract the failure code, passing unknown codes through unchanged
fn failure(response: &Response) -> Result<Reply> {
    match response.result_code() {
        Some(code) => Ok(Reply::failure(code)),
        None => Err(ClientError::MalformedResponse(format!(
            "no result code in {:?}",
            response.status
        ))),
    }
}
