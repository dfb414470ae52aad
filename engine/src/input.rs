use winit::event::VirtualKeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Enter,
    Escape,
}

/// Discrete input delivered to the frame handler, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    /// Left button press in frame-buffer coordinates.
    MouseDown { x: i32, y: i32 },
    Quit,
}

pub fn map_virtual_key(key: VirtualKeyCode) -> Option<Key> {
    match key {
        VirtualKeyCode::Left | VirtualKeyCode::A => Some(Key::Left),
        VirtualKeyCode::Right | VirtualKeyCode::D => Some(Key::Right),
        VirtualKeyCode::Up | VirtualKeyCode::W => Some(Key::Up),
        VirtualKeyCode::Down | VirtualKeyCode::S => Some(Key::Down),
        VirtualKeyCode::Return | VirtualKeyCode::NumpadEnter | VirtualKeyCode::Space => {
            Some(Key::Enter)
        }
        VirtualKeyCode::Escape => Some(Key::Escape),
        _ => None,
    }
}
