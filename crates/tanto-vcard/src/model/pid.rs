//! Property identifiers (`PID` parameter values).

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// A `PID` parameter value: a local id with an optional reference into the
/// card's `CLIENTPIDMAP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pid {
    pub local_id: u32,
    pub client_pid_map_ref: Option<u32>,
}

impl Pid {
    #[must_use]
    pub const fn new(local_id: u32, client_pid_map_ref: Option<u32>) -> Self {
        Self {
            local_id,
            client_pid_map_ref,
        }
    }
}

impl FromStr for Pid {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.split_once('.') {
            Some((local, client)) => Self::new(local.parse()?, Some(client.parse()?)),
            None => Self::new(s.parse()?, None),
        })
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.client_pid_map_ref {
            Some(client) => write!(f, "{}.{client}", self.local_id),
            None => write!(f, "{}", self.local_id),
        }
    }
}
