//! Session topology: which role this process plays and where it sits in its
//! process group.

use crate::foundation::error::{ParvisError, ParvisResult};

/// Process-topology role, resolved once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SynchronizerMode {
    /// Not yet initialized.
    Invalid,
    /// Single builtin process, no client-server split.
    Builtin,
    /// Thin client receiving composited images.
    Client,
    /// Render-server process.
    Server,
    /// Non-interactive batch process.
    Batch,
}

/// Session topology: the role, rank and size of this process's group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Session {
    mode: SynchronizerMode,
    rank: usize,
    num_processes: usize,
}

impl Session {
    /// Single-process builtin session.
    pub fn builtin() -> Self {
        Self {
            mode: SynchronizerMode::Builtin,
            rank: 0,
            num_processes: 1,
        }
    }

    /// Client-side session.
    pub fn client() -> Self {
        Self {
            mode: SynchronizerMode::Client,
            rank: 0,
            num_processes: 1,
        }
    }

    /// Render-server session at `rank` of `num_processes`.
    pub fn server(rank: usize, num_processes: usize) -> ParvisResult<Self> {
        Self::grouped(SynchronizerMode::Server, rank, num_processes)
    }

    /// Batch session at `rank` of `num_processes`.
    pub fn batch(rank: usize, num_processes: usize) -> ParvisResult<Self> {
        Self::grouped(SynchronizerMode::Batch, rank, num_processes)
    }

    fn grouped(mode: SynchronizerMode, rank: usize, num_processes: usize) -> ParvisResult<Self> {
        if num_processes == 0 {
            return Err(ParvisError::validation("session needs >= 1 process"));
        }
        if rank >= num_processes {
            return Err(ParvisError::validation("session rank out of range"));
        }
        Ok(Self {
            mode,
            rank,
            num_processes,
        })
    }

    /// Topology role.
    pub fn mode(&self) -> SynchronizerMode {
        self.mode
    }

    /// Rank of this process within its group.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Size of this process's group.
    pub fn num_processes(&self) -> usize {
        self.num_processes
    }
}
