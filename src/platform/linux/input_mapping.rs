//=========================================================================
// Winit Input Mapping
//=========================================================================
//
// Converts winit window events into native callback payloads.
//
// Architecture:
//   WindowEvent → native_event() → NativeEvent → LinuxWindow dispatch
//
// Keys are mapped by physical location. Keys the engine does not name map
// to `KeyCode::Unidentified` and are still reported.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::event::{KeyCode, MouseButton};
use crate::platform::native::{InputAction, NativeEvent};

//=== Event Mapping =======================================================

/// Maps one winit window event to a native callback payload.
///
/// Returns `None` for events that have no callback (focus, IME, ...).
pub(super) fn native_event(event: &WindowEvent) -> Option<NativeEvent> {
    match event {
        WindowEvent::Resized(size) => Some(NativeEvent::SizeChanged {
            width: size.width,
            height: size.height,
        }),

        WindowEvent::CloseRequested => Some(NativeEvent::CloseRequested),

        WindowEvent::KeyboardInput { event, is_synthetic, .. } => key_event(event, *is_synthetic),

        WindowEvent::MouseInput { state, button, .. } => Some(NativeEvent::MouseButton {
            button: MouseButton::from(*button),
            action: element_action(*state, false),
        }),

        WindowEvent::MouseWheel { delta, .. } => {
            let (x_offset, y_offset) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x as f64, *y as f64),
                MouseScrollDelta::PixelDelta(position) => (position.x, position.y),
            };
            Some(NativeEvent::Scroll { x_offset, y_offset })
        }

        WindowEvent::CursorMoved { position, .. } => Some(NativeEvent::CursorPos {
            x: position.x,
            y: position.y,
        }),

        _ => None,
    }
}

fn key_event(event: &KeyEvent, is_synthetic: bool) -> Option<NativeEvent> {
    key_input(event.physical_key, event.state, event.repeat, is_synthetic)
}

/// Builds the key payload, skipping synthetic presses.
///
/// winit replays keys already held when the window gains focus; those are
/// not real presses. Synthetic releases (focus lost) still go through.
fn key_input(
    physical_key: PhysicalKey,
    state: ElementState,
    repeat: bool,
    is_synthetic: bool,
) -> Option<NativeEvent> {
    if is_synthetic && state == ElementState::Pressed {
        return None;
    }

    let key = match physical_key {
        PhysicalKey::Code(code) => KeyCode::from(code),
        PhysicalKey::Unidentified(_) => KeyCode::Unidentified,
    };

    Some(NativeEvent::Key {
        key,
        action: element_action(state, repeat),
    })
}

fn element_action(state: ElementState, repeat: bool) -> InputAction {
    match (state, repeat) {
        (ElementState::Pressed, false) => InputAction::Press,
        (ElementState::Pressed, true) => InputAction::Repeat,
        (ElementState::Released, _) => InputAction::Release,
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts winit physical key codes to engine key codes.
///
/// Maps A-Z, 0-9, F1-F12, arrows, modifiers and common special keys.
/// Everything else (numpad, media keys, F13+) becomes `Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Function Row -------------------------------------------------

            F1 => KeyCode::F1,
            F2 => KeyCode::F2,
            F3 => KeyCode::F3,
            F4 => KeyCode::F4,
            F5 => KeyCode::F5,
            F6 => KeyCode::F6,
            F7 => KeyCode::F7,
            F8 => KeyCode::F8,
            F9 => KeyCode::F9,
            F10 => KeyCode::F10,
            F11 => KeyCode::F11,
            F12 => KeyCode::F12,

            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Modifiers ----------------------------------------------------

            ShiftLeft => KeyCode::ShiftLeft,
            ShiftRight => KeyCode::ShiftRight,
            ControlLeft => KeyCode::ControlLeft,
            ControlRight => KeyCode::ControlRight,
            AltLeft => KeyCode::AltLeft,
            AltRight => KeyCode::AltRight,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,

            _ => KeyCode::Unidentified,
        }
    }
}

/// Converts winit mouse buttons to engine buttons.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            WinitMouseButton::Back => MouseButton::Back,
            WinitMouseButton::Forward => MouseButton::Forward,
            WinitMouseButton::Other(index) => MouseButton::Other(index),
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
