pub mod color;
pub mod field;
pub mod particle;
pub mod renderer;
mod utils;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use crate::field::FieldState;
use crate::renderer::Renderer;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

// Handle for a mounted particle background. Owns the simulation state, the
// window resize listener, and the shared flag the animation loop checks
// before scheduling its next frame.
#[wasm_bindgen]
pub struct ParticleField {
    state: Rc<RefCell<FieldState>>,
    running: Rc<Cell<bool>>,
    on_resize: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl ParticleField {
    // Looks up the canvas by id, sizes it to the viewport, seeds the
    // particles, and starts the animation loop. A missing canvas or an
    // unavailable 2d context yields an inert handle: the effect is purely
    // decorative, so there is nothing to report and nothing to retry.
    pub fn mount(canvas_id: &str) -> ParticleField {
        let mut handle = ParticleField {
            state: Rc::new(RefCell::new(FieldState::empty())),
            running: Rc::new(Cell::new(false)),
            on_resize: None,
        };
        handle.start(canvas_id);
        handle
    }

    // Stops the loop and removes the resize listener. The frame callback
    // already scheduled observes the flag, drops itself, and schedules
    // nothing further.
    pub fn unmount(&mut self) {
        self.running.set(false);
        if let Some(on_resize) = self.on_resize.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.remove_event_listener_with_callback(
                    "resize",
                    on_resize.as_ref().unchecked_ref(),
                );
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn particle_count(&self) -> u32 {
        self.state.borrow().particles.len() as u32
    }
}

impl ParticleField {
    fn start(&mut self, canvas_id: &str) -> Option<()> {
        let window = web_sys::window()?;
        let document = window.document()?;
        let canvas = document
            .get_element_by_id(canvas_id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;

        let (width, height) = viewport_size(&window)?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let renderer = Renderer::new(&canvas)?;

        {
            let _timer = utils::Timer::new("ParticleField::mount");
            *self.state.borrow_mut() =
                FieldState::new(width, height, &mut rand::thread_rng());
        }

        // Resizing moves the canvas and the simulation bounds to the new
        // viewport; existing particles are left where they are.
        let resize_state = Rc::clone(&self.state);
        let resize_canvas = canvas.clone();
        let on_resize = Closure::wrap(Box::new(move || {
            if let Some(window) = web_sys::window() {
                if let Some((width, height)) = viewport_size(&window) {
                    resize_canvas.set_width(width as u32);
                    resize_canvas.set_height(height as u32);
                    resize_state.borrow_mut().resize(width, height);
                }
            }
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .ok()?;
        self.on_resize = Some(on_resize);
        self.running.set(true);

        // Self-rescheduling frame loop. The closure holds an Rc to its own
        // slot; once the running flag drops it takes itself out of the slot,
        // breaking the cycle so everything frees.
        let frame_state = Rc::clone(&self.state);
        let running = Rc::clone(&self.running);
        let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let frame_handle = Rc::clone(&frame);
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if !running.get() {
                frame_handle.borrow_mut().take();
                return;
            }
            {
                let mut state = frame_state.borrow_mut();
                state.update();
                renderer.render(&state);
            }
            if let Some(callback) = frame_handle.borrow().as_ref() {
                request_animation_frame(callback);
            }
        }) as Box<dyn FnMut()>));
        if let Some(callback) = frame.borrow().as_ref() {
            request_animation_frame(callback);
        }
        Some(())
    }
}

fn request_animation_frame(callback: &Closure<dyn FnMut()>) {
    if let Some(window) = web_sys::window() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

fn viewport_size(window: &web_sys::Window) -> Option<(f64, f64)> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width, height))
}
