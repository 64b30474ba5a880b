use batis_core::{err, Configuration, Error, Result};

/// Outcome of draining the pending queues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    /// Passes run, including the final one that resolved nothing
    pub passes: usize,

    /// Elements resolved across all passes
    pub resolved: usize,

    /// Elements still queued afterwards
    pub remaining: usize,
}

/// Retries queued result maps, cache refs, and statements until a pass
/// resolves nothing.
///
/// Elements that stay unresolved remain queued for documents loaded later.
pub fn resolve_pending(config: &Configuration) -> Result<Progress> {
    let mut progress = Progress::default();

    loop {
        progress.passes += 1;

        let result_maps = config.pending_result_maps().drain_with(|pending| {
            pending
                .resolve(config)
                .map(|resolution| resolution.map(|_| ()))
                .map_err(|cause| deferred_failure(cause, "result map", &pending.id, &pending.resource))
        })?;

        let cache_refs = config.pending_cache_refs().drain_with(|pending| {
            pending
                .resolve(config)
                .map(|resolution| resolution.map(|_| ()))
                .map_err(|cause| {
                    deferred_failure(cause, "cache-ref", &pending.namespace, &pending.resource)
                })
        })?;

        let statements = config.pending_statements().drain_with(|pending| {
            pending
                .resolve(config)
                .map_err(|cause| deferred_failure(cause, "statement", pending.id(), pending.resource()))
        })?;

        let resolved = result_maps + cache_refs + statements;
        progress.resolved += resolved;

        tracing::trace!(
            pass = progress.passes,
            result_maps,
            cache_refs,
            statements,
            "retried pending elements"
        );

        if resolved == 0 {
            break;
        }
    }

    progress.remaining = config.pending_count();
    if progress.remaining > 0 {
        tracing::debug!(remaining = progress.remaining, "elements still waiting on references");
    }

    Ok(progress)
}

fn deferred_failure(cause: Error, kind: &str, id: &str, resource: &str) -> Error {
    cause.context(err!("error resolving {kind} '{id}' from '{resource}'"))
}
