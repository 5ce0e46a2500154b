mod graphics;
mod grid;
mod input;
mod simulation;

use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use crate::graphics::GraphicsRenderer;
use crate::input::{InputAction, InputHandler};
use crate::simulation::{Pointer, Simulation};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Conway's Game of Life!")
        .with_inner_size(winit::dpi::LogicalSize::new(WIDTH, HEIGHT))
        .with_resizable(false)
        .build(&event_loop)?;

    let mut graphics = GraphicsRenderer::new(&window, WIDTH, HEIGHT)?;
    let mut rng = StdRng::from_entropy();
    let mut simulation = Simulation::new(&mut rng);
    let mut input_handler = InputHandler::new();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    graphics.resize(size.width, size.height);
                }
                WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                    graphics.resize(new_inner_size.width, new_inner_size.height);
                }
                WindowEvent::KeyboardInput { input, .. } => {
                    match input_handler.handle_keyboard_input(&input) {
                        InputAction::TogglePause => simulation.toggle_running(),
                        InputAction::None => {}
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input_handler.handle_cursor_moved(position);
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input_handler.handle_mouse_input(state, button);
                }
                WindowEvent::Touch(touch) => {
                    input_handler.handle_touch(touch.id, touch.phase, touch.location);
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                let pointer = match input_handler.pointer_position() {
                    Some(position) => {
                        Pointer::Pressed(graphics.cell_at(simulation.grid(), position))
                    }
                    None => Pointer::Released,
                };
                simulation.tick(pointer);

                graphics.render(simulation.grid());
                if let Err(err) = graphics.present() {
                    log::error!("Render error: {}", err);
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });
}
