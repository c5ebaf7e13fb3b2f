//! Exit gating.
//!
//! Kiosk deployments lock the shell down; leaving it requires the
//! configured password. The comparison is constant-time so the gate does
//! not leak a matching prefix through timing.

use subtle::ConstantTimeEq;

pub struct ExitGate {
    password: Option<String>,
}

impl ExitGate {
    pub fn new(password: Option<String>) -> Self {
        Self { password }
    }

    /// Whether exit is gated at all.
    pub fn is_enabled(&self) -> bool {
        self.password.is_some()
    }

    /// `true` when `attempt` unlocks the gate, or no gate is configured.
    pub fn verify(&self, attempt: &str) -> bool {
        match &self.password {
            None => true,
            Some(password) => password.as_bytes().ct_eq(attempt.as_bytes()).into(),
        }
    }
}
