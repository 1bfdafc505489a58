use super::{Agent, AgentContext, AgentFactory, AgentHandle, RandomAgent, WeightedAgent};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("unknown agent kind `{kind}` (available: {available})")]
    UnknownAgent { kind: String, available: String },
    #[error("empty agent entry")]
    EmptyEntry,
}

/// 組み込みエージェント一覧
static BUILTIN: Lazy<BTreeMap<&'static str, fn(&str, &AgentContext) -> Box<dyn Agent>>> =
    Lazy::new(|| {
        let mut map: BTreeMap<&'static str, fn(&str, &AgentContext) -> Box<dyn Agent>> =
            BTreeMap::new();
        map.insert("random", |name: &str, ctx: &AgentContext| -> Box<dyn Agent> {
            Box::new(RandomAgent::new(name, ctx))
        });
        map.insert("weighted", |name: &str, ctx: &AgentContext| -> Box<dyn Agent> {
            Box::new(WeightedAgent::new(name, ctx))
        });
        map
    });

pub fn available() -> Vec<&'static str> {
    BUILTIN.keys().copied().collect()
}

/// Resolves one built-in kind into a handle named `id`.
pub fn load(id: &str, kind: &str) -> Result<AgentHandle, LoadError> {
    let build = *BUILTIN.get(kind).ok_or_else(|| LoadError::UnknownAgent {
        kind: kind.to_string(),
        available: available().join(", "),
    })?;
    let name = id.to_string();
    let factory: AgentFactory = Arc::new(move |ctx: &AgentContext| build(&name, ctx));
    Ok(AgentHandle::new(id, kind, factory))
}

/// Parses roster entries of the form `kind` or `alias=kind`.
///
/// Every entry is resolved before anything is returned, so a bad entry fails
/// the whole roster. Repeated identities get a `#2`, `#3`, ... suffix.
pub fn load_roster<S: AsRef<str>>(entries: &[S]) -> Result<Vec<AgentHandle>, LoadError> {
    let mut roster: Vec<AgentHandle> = Vec::with_capacity(entries.len());
    for entry in entries {
        let entry = entry.as_ref().trim();
        if entry.is_empty() {
            return Err(LoadError::EmptyEntry);
        }
        let (alias, kind) = match entry.split_once('=') {
            Some((alias, kind)) => (alias.trim(), kind.trim()),
            None => (entry, entry),
        };
        if alias.is_empty() || kind.is_empty() {
            return Err(LoadError::EmptyEntry);
        }

        let mut id = alias.to_string();
        let mut n = 1;
        while roster.iter().any(|h| h.id == id) {
            n += 1;
            id = format!("{}#{}", alias, n);
        }
        roster.push(load(&id, kind)?);
    }
    Ok(roster)
}
