use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use error_stack::{Result, ResultExt};

use std::io::{Read, Write};
use std::os::unix::net::UnixStream;

use crate::hand::Hand;
use crate::{GError, ImageFrame};

/// Where frames come from. `next_frame` blocks until one is available.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<ImageFrame, GError>;
}

/// Hand landmark detector. Returns every hand found in the frame, in the
/// detector's own order; an empty vector means no hand.
pub trait LandmarkSource {
    fn detect(&mut self, frame: &ImageFrame) -> Result<Vec<Hand>, GError>;
}

impl<T: LandmarkSource + ?Sized> LandmarkSource for Box<T> {
    fn detect(&mut self, frame: &ImageFrame) -> Result<Vec<Hand>, GError> {
        (**self).detect(frame)
    }
}

/// Receives the finished frame with its FPS and gesture label.
/// The label is empty when no hand was seen.
pub trait DisplaySink {
    fn show(&mut self, frame: &ImageFrame, fps: f32, gesture: &str) -> Result<(), GError>;
}

/// Length prefix for a message, which has to fit the u32 header.
fn wire_len(len: usize) -> Result<u32, GError> {
    u32::try_from(len)
        .change_context(GError::IpcError)
        .attach_printable_lazy(|| format!("message of {len} bytes is too large"))
}

pub(crate) trait WantIpc {
    fn unix_stream(&self) -> &UnixStream;

    fn send_ipc(&self, msg: &[u8], w: u32, h: u32) -> Result<(), GError> {
        let msg_len = wire_len(msg.len())?;

        self.send_u32(w)?;
        self.send_u32(h)?;
        self.send_u32(msg_len)?;

        self.unix_stream()
            .write_all(msg)
            .change_context(GError::IpcError)?;

        Ok(())
    }

    fn recv_ipc(&self) -> Result<Vec<u8>, GError> {
        let msg_len = self.recv_u32()? as usize;

        let mut msg = vec![0; msg_len];
        self.unix_stream()
            .read_exact(&mut msg)
            .change_context(GError::IpcError)
            .attach_printable_lazy(|| format!("expected a message of {msg_len} bytes"))?;

        Ok(msg)
    }

    fn send_u32(&self, data: u32) -> Result<(), GError> {
        self.unix_stream()
            .write_u32::<NetworkEndian>(data)
            .change_context(GError::IpcError)
    }

    fn send_f32(&self, data: f32) -> Result<(), GError> {
        self.unix_stream()
            .write_f32::<NetworkEndian>(data)
            .change_context(GError::IpcError)
    }

    fn recv_u32(&self) -> Result<u32, GError> {
        self.unix_stream()
            .read_u32::<NetworkEndian>()
            .change_context(GError::IpcError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Peer(UnixStream);

    impl WantIpc for Peer {
        fn unix_stream(&self) -> &UnixStream {
            &self.0
        }
    }

    #[test]
    fn ipc_frame_layout() {
        let (a, mut b) = UnixStream::pair().unwrap();
        Peer(a).send_ipc(&[7, 8, 9], 640, 480).unwrap();

        let mut buf = [0u8; 15];
        b.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [0, 0, 2, 128, 0, 0, 1, 224, 0, 0, 0, 3, 7, 8, 9]);
    }

    #[test]
    fn ipc_message_roundtrip() {
        let (a, b) = UnixStream::pair().unwrap();
        let (a, b) = (Peer(a), Peer(b));

        a.send_u32(5).unwrap();
        (&a.0).write_all(b"hello").unwrap();

        assert_eq!(b.recv_ipc().unwrap(), b"hello");
    }

    #[test]
    fn wire_len_fits_u32() {
        assert_eq!(wire_len(3).unwrap(), 3);
        assert_eq!(wire_len(u32::MAX as usize).unwrap(), u32::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn oversized_message_is_rejected() {
        let err = wire_len(u32::MAX as usize + 1).unwrap_err();
        assert!(matches!(err.current_context(), GError::IpcError));
    }

    #[test]
    fn truncated_message_is_an_error() {
        let (a, b) = UnixStream::pair().unwrap();
        let b = Peer(b);

        Peer(a).send_u32(10).unwrap();
        // writer is dropped before the payload arrives

        let err = b.recv_ipc().unwrap_err();
        assert!(matches!(err.current_context(), GError::IpcError));
    }
}
