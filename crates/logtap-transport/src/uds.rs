use std::os::unix::fs::{FileTypeExt, MetadataExt, PermissionsExt};
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, TransportError};
use crate::stream::IpcStream;

/// Well-known endpoint file name, agreed with consumers out of band.
pub const DEFAULT_SOCKET_NAME: &str = "logtap.sock";

/// Default endpoint path: the well-known name under the system temp dir.
pub fn default_socket_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_SOCKET_NAME)
}

/// Server-side channel endpoint backed by a Unix domain socket.
///
/// Binds a filesystem-path socket and hands out connected [`IpcStream`]s via
/// a non-blocking accept, so an acceptor loop can poll for a consumer without
/// ever parking. The socket file is cleaned up on drop.
pub struct LogSocket {
    listener: UnixListener,
    path: PathBuf,
    created_inode: Option<(u64, u64)>,
    /// Whether the path should be removed on drop.
    cleanup_on_drop: bool,
}

impl LogSocket {
    /// Default permission mode for created socket paths.
    pub const DEFAULT_SOCKET_MODE: u32 = 0o600;
    /// Maximum socket path length.
    /// Unix `sockaddr_un.sun_path` is typically 108 bytes on Linux, 104 on macOS.
    #[cfg(target_os = "linux")]
    const MAX_PATH_LEN: usize = 108;
    #[cfg(not(target_os = "linux"))]
    const MAX_PATH_LEN: usize = 104;

    /// Bind the endpoint and start listening.
    ///
    /// The socket file is created at `path`. If the file already exists and
    /// is a socket, it is removed first (stale socket cleanup). The listener
    /// is placed in non-blocking mode so [`try_accept`](Self::try_accept)
    /// never parks the calling thread.
    pub fn bind(path: impl AsRef<Path>) -> Result<Self> {
        Self::bind_with_mode(path, Self::DEFAULT_SOCKET_MODE)
    }

    /// Bind the endpoint with an explicit permission mode.
    pub fn bind_with_mode(path: impl AsRef<Path>, mode: u32) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let path_bytes = path.as_os_str().len();
        if path_bytes >= Self::MAX_PATH_LEN {
            return Err(TransportError::PathTooLong {
                path,
                len: path_bytes,
                max: Self::MAX_PATH_LEN,
            });
        }

        // Remove stale socket if it exists, but never remove non-socket files.
        if path.exists() {
            let metadata = std::fs::symlink_metadata(&path).map_err(|e| TransportError::Bind {
                path: path.clone(),
                source: e,
            })?;
            if metadata.file_type().is_socket() {
                debug!(?path, "removing stale socket");
                std::fs::remove_file(&path).map_err(|e| TransportError::Bind {
                    path: path.clone(),
                    source: e,
                })?;
            } else {
                return Err(TransportError::Bind {
                    path: path.clone(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::AlreadyExists,
                        "existing path is not a unix socket",
                    ),
                });
            }
        }

        let listener = UnixListener::bind(&path).map_err(|e| TransportError::Bind {
            path: path.clone(),
            source: e,
        })?;
        listener
            .set_nonblocking(true)
            .map_err(|e| TransportError::Bind {
                path: path.clone(),
                source: e,
            })?;

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).map_err(|e| {
            TransportError::Bind {
                path: path.clone(),
                source: e,
            }
        })?;
        let created_metadata =
            std::fs::symlink_metadata(&path).map_err(|e| TransportError::Bind {
                path: path.clone(),
                source: e,
            })?;
        let created_inode = Some((created_metadata.dev(), created_metadata.ino()));

        info!(?path, "log endpoint listening");

        Ok(Self {
            listener,
            path,
            created_inode,
            cleanup_on_drop: true,
        })
    }

    /// Attempt to accept a waiting consumer without blocking.
    ///
    /// Returns `Ok(None)` when no consumer is waiting.
    pub fn try_accept(&self) -> Result<Option<IpcStream>> {
        match self.listener.accept() {
            Ok((stream, _addr)) => {
                // The accepted stream reverts to blocking; timeouts bound it.
                stream.set_nonblocking(false).map_err(TransportError::Accept)?;
                debug!("accepted consumer connection");
                Ok(Some(IpcStream::from_unix(stream)))
            }
            Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => Ok(None),
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => Ok(None),
            Err(err) => Err(TransportError::Accept(err)),
        }
    }

    /// Connect to a listening endpoint (blocking). Consumer side.
    pub fn connect(path: impl AsRef<Path>) -> Result<IpcStream> {
        let path = path.as_ref();
        let stream =
            std::os::unix::net::UnixStream::connect(path).map_err(|e| TransportError::Connect {
                path: path.to_path_buf(),
                source: e,
            })?;
        debug!(?path, "connected to log endpoint");
        Ok(IpcStream::from_unix(stream))
    }

    /// The path this endpoint is bound to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LogSocket {
    fn drop(&mut self) {
        if self.cleanup_on_drop {
            if let Some((expected_dev, expected_ino)) = self.created_inode {
                if let Ok(metadata) = std::fs::symlink_metadata(&self.path) {
                    if metadata.file_type().is_socket()
                        && metadata.dev() == expected_dev
                        && metadata.ino() == expected_ino
                    {
                        debug!(path = ?self.path, "cleaning up socket file");
                        let _ = std::fs::remove_file(&self.path);
                    } else {
                        debug!(
                            path = ?self.path,
                            "socket path identity changed; skipping cleanup"
                        );
                    }
                }
            }
        }
    }
}
