use crate::config::CameraProperties;
use crate::traits::{FrameSource, WantIpc};
use crate::{GError, ImageFrame};
use error_stack::{Result, ResultExt};
use log::info;
use std::os::unix::net::UnixStream;

/// Requests one frame per call from a camera process over a unix socket.
pub struct CameraProc {
    width: u32,
    height: u32,
    unix_stream: UnixStream,
}

impl CameraProc {
    pub fn connect(props: &CameraProperties) -> Result<Self, GError> {
        let unix_stream = UnixStream::connect(&props.socket)
            .change_context(GError::CameraError)
            .attach_printable_lazy(|| format!("Couldn't connect to {}", props.socket))?;

        Self::new(unix_stream, props.img_width, props.img_height)
    }

    pub fn new(unix_stream: UnixStream, width: u32, height: u32) -> Result<Self, GError> {
        let instance = Self {
            width,
            height,
            unix_stream,
        };

        instance.send_u32(width)?;
        instance.send_u32(height)?;

        info!("Camera connected ({width}x{height})");
        Ok(instance)
    }

    pub fn get(&self) -> Result<ImageFrame, GError> {
        self.send_u32(1).change_context(GError::CameraError)?;
        let frame = self.recv_ipc().change_context(GError::CameraError)?;

        Ok(ImageFrame::new(frame, self.width, self.height))
    }
}

impl FrameSource for CameraProc {
    fn next_frame(&mut self) -> Result<ImageFrame, GError> {
        self.get()
    }
}

impl WantIpc for CameraProc {
    fn unix_stream(&self) -> &UnixStream {
        &self.unix_stream
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::thread;

    use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};

    use super::*;

    #[test]
    fn fetches_a_frame() {
        let (client, mut cam) = UnixStream::pair().unwrap();

        let server = thread::spawn(move || {
            let w = cam.read_u32::<NetworkEndian>().unwrap();
            let h = cam.read_u32::<NetworkEndian>().unwrap();
            let sig = cam.read_u32::<NetworkEndian>().unwrap();

            cam.write_u32::<NetworkEndian>(6).unwrap();
            cam.write_all(&[1, 2, 3, 4, 5, 6]).unwrap();
            (w, h, sig)
        });

        let mut camera = CameraProc::new(client, 2, 1).unwrap();
        let frame = camera.next_frame().unwrap();

        assert_eq!(server.join().unwrap(), (2, 1, 1));
        assert_eq!(&frame.frame[..], &[1, 2, 3, 4, 5, 6]);
        assert_eq!((frame.width, frame.height), (2, 1));
    }

    #[test]
    fn closed_camera_is_a_camera_error() {
        let (client, mut cam) = UnixStream::pair().unwrap();
        let camera = CameraProc::new(client, 2, 1).unwrap();

        let mut handshake = [0u8; 8];
        cam.read_exact(&mut handshake).unwrap();
        drop(cam);

        let err = camera.get().unwrap_err();
        assert!(matches!(err.current_context(), GError::CameraError));
    }
}
