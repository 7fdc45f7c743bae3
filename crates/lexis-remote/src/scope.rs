/// Host-granted capability a cycle must hold before touching the network
pub trait HostScope: Send + Sync {
    fn enter(&self) -> Result<(), ScopeDenied>;
}

#[derive(Debug, thiserror::Error)]
#[error("host refused network scope: {0}")]
pub struct ScopeDenied(pub String);

/// No sandbox, every cycle may run
#[derive(Debug, Default, Clone, Copy)]
pub struct Unrestricted;

impl HostScope for Unrestricted {
    fn enter(&self) -> Result<(), ScopeDenied> {
        Ok(())
    }
}
