#![cfg(target_os = "linux")]

use canopen_nmt_rs::frame::{CAN_MAX_DATA_SIZE, CanFrame, CobId};
use canopen_nmt_rs::hal::{CanInterface, CanOpenError};
use log::warn;
use std::ffi::CString;
use std::io;
use std::mem;
use std::os::fd::RawFd;

/// A [`CanInterface`] backed by a non-blocking Linux SocketCAN raw socket.
pub struct SocketCanInterface {
    fd: RawFd,
}

impl SocketCanInterface {
    /// Opens a raw CAN socket bound to the named interface (e.g. "can0").
    pub fn new(interface_name: &str) -> Result<Self, String> {
        let name = CString::new(interface_name)
            .map_err(|_| format!("Invalid interface name '{}'", interface_name))?;

        // SAFETY: plain libc calls; the fd is owned by the returned struct
        // and closed in Drop.
        unsafe {
            let if_index = libc::if_nametoindex(name.as_ptr());
            if if_index == 0 {
                return Err(format!("Interface '{}' not found", interface_name));
            }

            let fd = libc::socket(
                libc::PF_CAN,
                libc::SOCK_RAW | libc::SOCK_NONBLOCK,
                libc::CAN_RAW,
            );
            if fd < 0 {
                return Err(io::Error::last_os_error().to_string());
            }

            let mut addr: libc::sockaddr_can = mem::zeroed();
            addr.can_family = libc::AF_CAN as libc::sa_family_t;
            addr.can_ifindex = if_index as libc::c_int;

            let bound = libc::bind(
                fd,
                &addr as *const libc::sockaddr_can as *const libc::sockaddr,
                mem::size_of::<libc::sockaddr_can>() as libc::socklen_t,
            );
            if bound < 0 {
                let err = io::Error::last_os_error().to_string();
                libc::close(fd);
                return Err(err);
            }

            Ok(Self { fd })
        }
    }
}

impl CanInterface for SocketCanInterface {
    fn send_frame(&mut self, frame: &CanFrame) -> Result<(), CanOpenError> {
        // SAFETY: writing a fully initialised can_frame of the exact size the
        // kernel expects on a CAN_RAW socket.
        unsafe {
            let mut raw: libc::can_frame = mem::zeroed();
            raw.can_id = frame.cob_id.raw() as libc::canid_t;
            if frame.rtr {
                raw.can_id |= libc::CAN_RTR_FLAG;
            }
            raw.can_dlc = frame.dlc.min(CAN_MAX_DATA_SIZE as u8);
            raw.data[..CAN_MAX_DATA_SIZE].copy_from_slice(&frame.data);

            let written = libc::write(
                self.fd,
                &raw as *const libc::can_frame as *const libc::c_void,
                mem::size_of::<libc::can_frame>(),
            );
            if written < 0 {
                warn!("[IO] CAN write failed: {}", io::Error::last_os_error());
                return Err(CanOpenError::IoError);
            }
        }
        Ok(())
    }

    fn receive_frame(&mut self) -> Result<Option<CanFrame>, CanOpenError> {
        // SAFETY: reading into a zeroed can_frame; the kernel delivers whole
        // frames on CAN_RAW sockets.
        unsafe {
            let mut raw: libc::can_frame = mem::zeroed();
            let read = libc::read(
                self.fd,
                &mut raw as *mut libc::can_frame as *mut libc::c_void,
                mem::size_of::<libc::can_frame>(),
            );
            if read < 0 {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::WouldBlock {
                    return Ok(None);
                }
                warn!("[IO] CAN read failed: {}", err);
                return Err(CanOpenError::IoError);
            }
            if (read as usize) < mem::size_of::<libc::can_frame>() {
                return Err(CanOpenError::IoError);
            }

            // Error frames and 29-bit identifiers are outside the CANopen
            // predefined connection set; drop them here.
            if raw.can_id & (libc::CAN_ERR_FLAG | libc::CAN_EFF_FLAG) != 0 {
                return Ok(None);
            }

            let rtr = raw.can_id & libc::CAN_RTR_FLAG != 0;
            let mut data = [0u8; CAN_MAX_DATA_SIZE];
            data.copy_from_slice(&raw.data[..CAN_MAX_DATA_SIZE]);

            Ok(Some(CanFrame {
                cob_id: CobId((raw.can_id & libc::CAN_SFF_MASK) as u16),
                rtr,
                dlc: raw.can_dlc.min(CAN_MAX_DATA_SIZE as u8),
                data,
            }))
        }
    }
}

impl Drop for SocketCanInterface {
    fn drop(&mut self) {
        // SAFETY: fd was opened by new() and is not used after this.
        unsafe {
            libc::close(self.fd);
        }
    }
}
