//! Native window records backed by GLFW
//!
//! Each window owns an OpenGL 3.3 core context used only to present CPU
//! canvases. GLFW itself is initialised lazily on the first window and
//! lives as long as the [`NativeLibrary`].

use std::collections::VecDeque;

use glfw::{Action, Context as GlfwContext, WindowEvent};
use image::RgbaImage;

use super::presenter::Presenter;
use super::{NativeLibrary, WindowKey};
use crate::error::ResourceKind;
use crate::foundation::math::{Vector2i, Vector2u};
use crate::window::{Event, Key, WindowSettings};

pub(crate) struct NativeWindow {
    // Dropped before `window` so GL objects go while the context still exists
    presenter: Option<Presenter>,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
    pending: VecDeque<Event>,
    open: bool,
}

impl NativeWindow {
    fn flush(&mut self) {
        for (_, event) in glfw::flush_messages(&self.events) {
            if let Some(event) = translate_event(event) {
                self.pending.push_back(event);
            }
        }
        // Closing is the application's decision, not glfw's
        if self.window.should_close() && self.open {
            self.window.set_should_close(false);
        }
    }
}

impl Drop for NativeWindow {
    fn drop(&mut self) {
        self.window.make_current();
        if let Some(presenter) = self.presenter.take() {
            presenter.delete();
        }
    }
}

#[allow(clippy::needless_pass_by_value)]
fn report_glfw_error(error: glfw::Error, description: String) {
    log::error!("GLFW error {error:?}: {description}");
}

fn translate_key(key: glfw::Key) -> Key {
    match key {
        glfw::Key::Escape => Key::Escape,
        glfw::Key::Left => Key::Left,
        glfw::Key::Right => Key::Right,
        glfw::Key::Up => Key::Up,
        glfw::Key::Down => Key::Down,
        glfw::Key::Space => Key::Space,
        glfw::Key::Enter | glfw::Key::KpEnter => Key::Enter,
        _ => Key::Unknown,
    }
}

fn translate_event(event: WindowEvent) -> Option<Event> {
    match event {
        WindowEvent::Close => Some(Event::Closed),
        WindowEvent::Size(width, height) => Some(Event::Resized {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
        }),
        WindowEvent::Key(key, _, Action::Press | Action::Repeat, _) => Some(Event::KeyPressed {
            code: translate_key(key),
        }),
        WindowEvent::Key(key, _, Action::Release, _) => Some(Event::KeyReleased {
            code: translate_key(key),
        }),
        WindowEvent::CursorPos(x, y) => Some(Event::MouseMoved {
            x: x as i32,
            y: y as i32,
        }),
        _ => None,
    }
}

impl NativeLibrary {
    pub(crate) fn window_create(&mut self, settings: &WindowSettings) -> WindowKey {
        if self.glfw.is_none() {
            match glfw::init(report_glfw_error) {
                Ok(glfw) => self.glfw = Some(glfw),
                Err(err) => {
                    log::error!("GLFW initialization failed: {err:?}");
                    return WindowKey::default();
                }
            }
        }
        let Some(glfw) = self.glfw.as_mut() else {
            return WindowKey::default();
        };

        glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::Resizable(settings.resizable));

        let Some((mut window, events)) = glfw.create_window(
            settings.width,
            settings.height,
            &settings.title,
            glfw::WindowMode::Windowed,
        ) else {
            log::error!("Window creation failed for \"{}\"", settings.title);
            return WindowKey::default();
        };

        window.set_key_polling(true);
        window.set_close_polling(true);
        window.set_size_polling(true);
        window.set_cursor_pos_polling(true);
        window.make_current();
        glfw.set_swap_interval(if settings.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        });

        let presenter = match Presenter::new(&mut window) {
            Ok(presenter) => Some(presenter),
            Err(err) => {
                log::error!("OpenGL presenter unavailable, window will not display: {err}");
                None
            }
        };

        self.record_created(ResourceKind::Window);
        let key = self.windows.insert(NativeWindow {
            presenter,
            window,
            events,
            pending: VecDeque::new(),
            open: true,
        });
        log::debug!(
            "Created window {key:?} \"{}\" ({}x{})",
            settings.title,
            settings.width,
            settings.height
        );
        key
    }

    pub(crate) fn window_destroy(&mut self, key: WindowKey) -> bool {
        let destroyed = self.windows.remove(key).is_some();
        if destroyed {
            log::debug!("Destroyed window {key:?}");
        }
        self.record_destroyed(ResourceKind::Window, destroyed)
    }

    pub(crate) fn window_is_open(&self, key: WindowKey) -> bool {
        self.windows.get(key).is_some_and(|window| window.open)
    }

    pub(crate) fn window_close(&mut self, key: WindowKey) {
        if let Some(record) = self.windows.get_mut(key) {
            record.open = false;
            record.window.set_should_close(true);
            record.window.hide();
            record.pending.clear();
        }
    }

    pub(crate) fn window_poll_event(&mut self, key: WindowKey) -> Option<Event> {
        let record = self.windows.get_mut(key)?;
        if !record.open {
            return None;
        }
        if record.pending.is_empty() {
            if let Some(glfw) = self.glfw.as_mut() {
                glfw.poll_events();
            }
            record.flush();
        }
        record.pending.pop_front()
    }

    pub(crate) fn window_get_size(&self, key: WindowKey) -> Vector2u {
        self.windows.get(key).map_or_else(Vector2u::zeros, |record| {
            let (width, height) = record.window.get_size();
            Vector2u::new(width.max(0) as u32, height.max(0) as u32)
        })
    }

    pub(crate) fn window_get_position(&self, key: WindowKey) -> Vector2i {
        self.windows.get(key).map_or_else(Vector2i::zeros, |record| {
            let (x, y) = record.window.get_pos();
            Vector2i::new(x, y)
        })
    }

    pub(crate) fn window_set_title(&mut self, key: WindowKey, title: &str) {
        if let Some(record) = self.windows.get_mut(key) {
            record.window.set_title(title);
        }
    }

    pub(crate) fn window_display(&mut self, key: WindowKey, image: &RgbaImage) {
        let Some(record) = self.windows.get_mut(key) else {
            return;
        };
        if !record.open {
            return;
        }
        record.window.make_current();
        let (width, height) = record.window.get_framebuffer_size();
        if let Some(presenter) = record.presenter.as_mut() {
            presenter.present(image, width, height);
        }
        record.window.swap_buffers();
    }
}
