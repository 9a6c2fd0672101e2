use std::ffi::CStr;
use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Error, Result};
use log::{debug, info, warn};
use sdl2::video::{GLContext, GLProfile, SwapInterval, Window};
use sdl2::{EventPump, Sdl, TimerSubsystem, VideoSubsystem};

use crate::config::WindowConfig;
use crate::event::{self, Button};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlVersion {
    pub major: u8,
    pub minor: u8,
}

impl GlVersion {
    pub const MINIMUM: GlVersion = GlVersion::new(2, 1);

    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    pub fn require(self, minimum: GlVersion) -> Result<()> {
        if self < minimum {
            bail!("OpenGL {} is not supported, need at least version {}", self, minimum);
        }

        Ok(())
    }
}

/// Reads the leading `major.minor` of a `GL_VERSION` string, e.g.
/// `"4.6.0 NVIDIA 535.54"` or `"OpenGL ES 3.2 Mesa 23.0"`.
impl FromStr for GlVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim_start();
        let trimmed = trimmed.strip_prefix("OpenGL ES ").unwrap_or(trimmed);
        let number = trimmed.split_whitespace().next().unwrap_or("");
        let mut parts = number.split('.');

        match (parts.next().and_then(leading_u8), parts.next().and_then(leading_u8)) {
            (Some(major), Some(minor)) => Ok(GlVersion::new(major, minor)),
            _ => bail!("invalid GL version string {:?}", s),
        }
    }
}

fn leading_u8(part: &str) -> Option<u8> {
    let end = part.find(|c: char| !c.is_ascii_digit()).unwrap_or(part.len());
    part[..end].parse().ok()
}

/// Version of the current context as reported by the driver. Requires loaded
/// GL function pointers.
fn current_gl_version() -> Result<(GlVersion, String)> {
    let bytes = unsafe { gl::GetString(gl::VERSION) };
    gl_check!();
    if bytes.is_null() {
        return Err(anyhow!("could not get GL version string"));
    }

    let raw = unsafe { CStr::from_ptr(bytes.cast()) }
        .to_str()
        .context("invalid GL version string")?
        .to_owned();

    Ok((raw.parse()?, raw))
}

impl fmt::Display for GlVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Field order is drop order: the context goes before its window, SDL last.
pub struct Platform {
    events: EventPump,
    _context: GLContext,
    window: Window,
    timer: TimerSubsystem,
    _video: VideoSubsystem,
    _sdl: Sdl,
}

impl Platform {
    pub fn init(config: &WindowConfig) -> Result<Self> {
        check_sdl_version();

        let sdl = sdl2::init()
            .map_err(Error::msg)
            .context("unable to initialize SDL")?;
        let video = sdl.video().map_err(Error::msg).context("unable to initialize SDL video")?;
        let timer = sdl.timer().map_err(Error::msg).context("unable to initialize SDL timer")?;

        let gl_attr = video.gl_attr();
        gl_attr.set_context_profile(GLProfile::Compatibility);
        gl_attr.set_context_version(GlVersion::MINIMUM.major, GlVersion::MINIMUM.minor);

        let window = video
            .window(&config.title, config.width, config.height)
            .position_centered()
            .opengl()
            .build()
            .context("could not create window")?;

        let context = window
            .gl_create_context()
            .map_err(Error::msg)
            .context("could not create GL context for window")?;
        window
            .gl_make_current(&context)
            .map_err(Error::msg)
            .context("could not make GL context current")?;

        gl::load_with(|name| video.gl_get_proc_address(name) as *const _);

        let (version, raw) = current_gl_version()?;
        info!("OpenGL current version: {} ({})", version, raw);
        version.require(GlVersion::MINIMUM)?;

        if config.vsync {
            if let Err(err) = video.gl_set_swap_interval(SwapInterval::VSync) {
                warn!("vsync unavailable: {}", err);
            }
        }

        let events = sdl.event_pump().map_err(Error::msg).context("could not obtain event pump")?;
        debug!("window {} created ({}x{})", window.id(), config.width, config.height);

        Ok(Self {
            events,
            _context: context,
            window,
            timer,
            _video: video,
            _sdl: sdl,
        })
    }

    pub fn poll_button(&mut self) -> Option<Button> {
        event::poll_button(&mut self.events)
    }

    pub fn swap(&self) {
        self.window.gl_swap_window();
    }

    pub fn delay(&mut self, ms: u32) {
        self.timer.delay(ms);
    }
}

impl Drop for Platform {
    fn drop(&mut self) {
        debug!("destroying window {}", self.window.id());
    }
}

fn check_sdl_version() {
    let linked = sdl2::version::version();
    let compiled = (
        sdl2::sys::SDL_MAJOR_VERSION,
        sdl2::sys::SDL_MINOR_VERSION,
        sdl2::sys::SDL_PATCHLEVEL,
    );

    if compiled != (linked.major as u32, linked.minor as u32, linked.patch as u32) {
        warn!(
            "SDL2 compiled ({}.{}.{}) and linked ({}) versions mismatch, errors or crashes may occur",
            compiled.0, compiled.1, compiled.2, linked
        );
    }
}

#[test]
fn gl_version_ordering() {
    assert!(GlVersion::new(2, 0) < GlVersion::MINIMUM);
    assert!(GlVersion::new(1, 5) < GlVersion::MINIMUM);
    assert!(GlVersion::new(3, 0) > GlVersion::MINIMUM);
    assert!(GlVersion::new(2, 1) == GlVersion::MINIMUM);
}

#[test]
fn gl_version_require() {
    assert!(GlVersion::new(2, 1).require(GlVersion::MINIMUM).is_ok());
    assert!(GlVersion::new(4, 6).require(GlVersion::MINIMUM).is_ok());
    assert!(GlVersion::new(3, 0).require(GlVersion::MINIMUM).is_ok());
    assert!(GlVersion::new(2, 0).require(GlVersion::MINIMUM).is_err());
    assert!(GlVersion::new(1, 4).require(GlVersion::MINIMUM).is_err());
}

#[test]
fn gl_version_parse() {
    assert_eq!(GlVersion::new(2, 1), "2.1 Mesa 23.0".parse::<GlVersion>().unwrap());
    assert_eq!(GlVersion::new(1, 4), "1.4".parse::<GlVersion>().unwrap());
    assert_eq!(GlVersion::new(4, 6), "4.6.0 NVIDIA 535.54".parse::<GlVersion>().unwrap());
    assert_eq!(GlVersion::new(3, 3), "3.3 (Compatibility Profile) Mesa".parse::<GlVersion>().unwrap());
    assert_eq!(GlVersion::new(3, 2), "OpenGL ES 3.2 Mesa 23.0".parse::<GlVersion>().unwrap());
    assert_eq!(GlVersion::new(3, 0), "3.0-beta".parse::<GlVersion>().unwrap());
}

#[test]
fn gl_version_parse_rejects_garbage() {
    assert!("".parse::<GlVersion>().is_err());
    assert!("4".parse::<GlVersion>().is_err());
    assert!("Mesa 23.0".parse::<GlVersion>().is_err());
}

#[test]
fn parsed_old_version_is_rejected() {
    let version: GlVersion = "1.4 Microsoft".parse().unwrap();
    assert!(version.require(GlVersion::MINIMUM).is_err());
}

#[test]
fn gl_version_display() {
    assert_eq!("2.1", GlVersion::MINIMUM.to_string());
}
