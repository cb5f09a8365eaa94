//! Scripted control connection shared by the unit tests.

use std::collections::{HashMap, VecDeque};

use crate::{
    channel::{CapabilitySet, CommandChannel, DirectoryLister, Reply, TransferType},
    entry::Entry,
    error::Error,
};

pub fn ok(message: &str) -> Reply {
    Reply {
        success: true,
        code: 213,
        message: message.to_owned(),
    }
}

pub fn refused(message: &str) -> Reply {
    Reply {
        success: false,
        code: 550,
        message: message.to_owned(),
    }
}

/// Replays canned replies and listings while recording every command
/// and `TYPE` switch the code under test issues.
#[derive(Default)]
pub struct ScriptedLink {
    pub replies: VecDeque<Reply>,
    pub features: Vec<String>,
    pub listings: HashMap<String, Vec<Entry>>,
    pub commands: Vec<String>,
    pub switches: Vec<TransferType>,
    /// When set, `MFMT` stores its timestamp argument and `MDTM`
    /// echoes it back instead of consuming the script.
    pub echo_mfmt: bool,
    stored_stamp: Option<String>,
}

impl ScriptedLink {
    pub fn with_features(features: &[&str]) -> Self {
        Self {
            features: features.iter().map(|f| (*f).to_owned()).collect(),
            ..Self::default()
        }
    }

    pub fn push_reply(&mut self, reply: Reply) {
        self.replies.push_back(reply);
    }
}

#[async_trait]
impl CommandChannel for ScriptedLink {
    async fn execute(&mut self, command: &str) -> Result<Reply, Error> {
        self.commands.push(command.to_owned());

        if self.echo_mfmt {
            if let Some(rest) = command.strip_prefix("MFMT ") {
                let stamp = rest.split_whitespace().next().unwrap_or("").to_owned();
                self.stored_stamp = Some(stamp);
                return Ok(ok("modified time set"));
            }
            if command.starts_with("MDTM ") {
                return Ok(match &self.stored_stamp {
                    Some(stamp) => ok(stamp),
                    None => refused("no stored time"),
                });
            }
        }

        Ok(self
            .replies
            .pop_front()
            .unwrap_or_else(|| refused("unscripted command")))
    }

    async fn set_transfer_type(&mut self, r#type: TransferType) -> Result<(), Error> {
        self.switches.push(r#type);
        Ok(())
    }
}

#[async_trait]
impl DirectoryLister for ScriptedLink {
    async fn list(&mut self, directory: &str) -> Result<Vec<Entry>, Error> {
        Ok(self.listings.get(directory).cloned().unwrap_or_default())
    }
}

impl CapabilitySet for ScriptedLink {
    fn has_feature(&self, name: &str) -> bool {
        self.features.iter().any(|f| f == name)
    }
}
