//! Process handoff: replace the sequencer with the service executable.
//!
//! The service must end up as the container's primary process: it receives
//! signals directly, its exit code is the container's exit code, and no
//! supervisory parent is left behind. On Unix that is `execvp`; elsewhere the
//! fallback runs the child and forwards its exit code explicitly.

use std::io;
use std::process::Command;

/// Marker for a completed handoff observed by the caller.
///
/// The exec-based launcher never produces one: on success the process image
/// is replaced and control does not return. Test launchers return it so a
/// sequence can be driven to completion in-process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handover;

/// Seam between the sequencer and process replacement.
pub trait Launcher {
    /// Start the service command, consuming this process's identity.
    ///
    /// `Err` means the executable could not be started. `Ok` means the
    /// caller keeps running, which only mock launchers do.
    fn launch(&self, command: &[String]) -> io::Result<Handover>;
}

/// Launcher that execs the target executable in place.
pub struct ExecLauncher;

impl Launcher for ExecLauncher {
    #[cfg(unix)]
    fn launch(&self, command: &[String]) -> io::Result<Handover> {
        use std::os::unix::process::CommandExt;

        let (program, args) = split_command(command)?;
        // exec inherits environment and standard streams, and only returns
        // on failure.
        Err(Command::new(program).args(args).exec())
    }

    #[cfg(not(unix))]
    fn launch(&self, command: &[String]) -> io::Result<Handover> {
        let (program, args) = split_command(command)?;
        // Spawn-and-forward fallback where no image-replace primitive
        // exists: the child shares this process's console, so interrupts
        // reach it directly; only the exit code needs explicit relaying.
        let status = Command::new(program).args(args).status()?;
        std::process::exit(status.code().unwrap_or(1));
    }
}

fn split_command(command: &[String]) -> io::Result<(&String, &[String])> {
    match command.split_first() {
        Some((program, args)) => Ok((program, args)),
        None => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "empty service command",
        )),
    }
}
