use crate::core::Fault;
use crate::player::Agent;
use std::any::Any;
use std::time::Duration;

/// A call that did not produce a value. `agent` is set when the call returned
/// an error in time; a timed-out or panicked agent is lost.
pub(crate) struct CallFailure {
    pub agent: Option<Box<dyn Agent>>,
    pub fault: Fault,
}

impl CallFailure {
    fn lost(fault: Fault) -> Self {
        CallFailure { agent: None, fault }
    }
}

/// Runs one agent call on a blocking worker and waits at most `deadline`.
///
/// The agent is moved into the worker and handed back whenever the call
/// completes in time, even with an error. On timeout the worker is detached:
/// whatever it returns later is dropped together with the agent.
pub(crate) async fn call_with_deadline<T, F>(
    agent: Box<dyn Agent>,
    deadline: Duration,
    call: F,
) -> Result<(Box<dyn Agent>, T), CallFailure>
where
    T: Send + 'static,
    F: FnOnce(&mut dyn Agent) -> anyhow::Result<T> + Send + 'static,
{
    let task = tokio::task::spawn_blocking(move || {
        let mut agent = agent;
        let result = call(agent.as_mut());
        (agent, result)
    });

    match tokio::time::timeout(deadline, task).await {
        Err(_) => Err(CallFailure::lost(Fault::Timeout)),
        Ok(Err(join_error)) => Err(CallFailure::lost(Fault::AgentError(
            if join_error.is_panic() {
                format!("panicked: {}", panic_message(join_error.into_panic()))
            } else {
                join_error.to_string()
            },
        ))),
        Ok(Ok((agent, Err(e)))) => Err(CallFailure {
            agent: Some(agent),
            fault: Fault::AgentError(format!("{:#}", e)),
        }),
        Ok(Ok((agent, Ok(value)))) => Ok((agent, value)),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
