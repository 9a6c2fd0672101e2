use std::path::Path;

use log::{debug, error, info, trace};

use crate::event::Button;
use crate::vertex::Triangle;

/// Platform side of the frame loop.
pub trait Frontend {
    fn poll_button(&mut self) -> Option<Button>;
    fn draw(&mut self, triangle: &Triangle);
    fn present(&mut self);
}

#[derive(Debug)]
pub enum Exit {
    Quit,
    /// The vertex file could not be read or parsed.
    DataUnavailable(anyhow::Error),
}

/// Runs poll, load, draw, present until `QUIT` or a vertex file failure.
pub fn run<F: Frontend>(frontend: &mut F, vertex_file: &Path) -> Exit {
    let mut frames = 0u64;

    let exit = loop {
        if let Some(button) = frontend.poll_button() {
            info!("Button pressed: {}", button);
            if button == Button::Quit {
                break Exit::Quit;
            }
        }

        let triangle = match Triangle::load(vertex_file) {
            Ok(triangle) => triangle,
            Err(err) => {
                error!("{:#}", err);
                break Exit::DataUnavailable(err);
            }
        };
        trace!("frame {}: {:?}", frames, triangle);

        frontend.draw(&triangle);
        frontend.present();
        frames += 1;
    };

    debug!("frame loop finished after {} frames", frames);
    exit
}

#[cfg(test)]
mod test {
    use std::collections::VecDeque;
    use std::fs;
    use std::path::PathBuf;

    use super::*;
    use crate::vertex::Vertex;

    /// Replays a fixed script of buttons, one poll per frame; an exhausted
    /// script quits.
    struct Scripted {
        buttons: VecDeque<Option<Button>>,
        drawn: Vec<Triangle>,
        presented: usize,
    }

    impl Scripted {
        fn new(buttons: Vec<Option<Button>>) -> Self {
            Self {
                buttons: buttons.into(),
                drawn: Vec::new(),
                presented: 0,
            }
        }
    }

    impl Frontend for Scripted {
        fn poll_button(&mut self) -> Option<Button> {
            self.buttons.pop_front().unwrap_or(Some(Button::Quit))
        }

        fn draw(&mut self, triangle: &Triangle) {
            self.drawn.push(*triangle);
        }

        fn present(&mut self) {
            self.presented += 1;
        }
    }

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("eng-frame-{}-{}.txt", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn quit_stops_before_drawing() {
        let path = scratch_file("quit", "0 0 1 0 0 1");
        let mut frontend = Scripted::new(vec![Some(Button::Quit)]);

        let exit = run(&mut frontend, &path);
        fs::remove_file(&path).unwrap();

        assert!(matches!(exit, Exit::Quit));
        assert!(frontend.drawn.is_empty());
        assert_eq!(0, frontend.presented);
    }

    #[test]
    fn draws_every_frame_until_quit() {
        let path = scratch_file("draw", "-0.5 -0.5 0.5 -0.5 0.0 0.5");
        let mut frontend = Scripted::new(vec![None, Some(Button::Up), Some(Button::Fire1)]);

        let exit = run(&mut frontend, &path);
        fs::remove_file(&path).unwrap();

        assert!(matches!(exit, Exit::Quit));
        assert_eq!(3, frontend.drawn.len());
        assert_eq!(3, frontend.presented);

        let expected = Triangle::new(Vertex::new(-0.5, -0.5), Vertex::new(0.5, -0.5), Vertex::new(0.0, 0.5));
        assert!(frontend.drawn.iter().all(|t| *t == expected));
    }

    #[test]
    fn missing_file_stops_cleanly() {
        let path = std::env::temp_dir().join("eng-frame-does-not-exist.txt");
        let mut frontend = Scripted::new(vec![None; 10]);

        let exit = run(&mut frontend, &path);

        assert!(matches!(exit, Exit::DataUnavailable(..)));
        assert!(frontend.drawn.is_empty());
        assert_eq!(9, frontend.buttons.len());
    }

    #[test]
    fn malformed_file_stops_cleanly() {
        let path = scratch_file("malformed", "1 2 3 oops");
        let mut frontend = Scripted::new(vec![None; 10]);

        let exit = run(&mut frontend, &path);
        fs::remove_file(&path).unwrap();

        match exit {
            Exit::DataUnavailable(err) => {
                assert!(err.downcast_ref::<crate::vertex::ParseTriangleError>().is_some())
            }
            other => panic!("unexpected exit: {:?}", other),
        }
        assert!(frontend.drawn.is_empty());
    }
}
