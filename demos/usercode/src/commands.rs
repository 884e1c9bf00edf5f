//! Callbacks bound to the terminals declared in `commands.cfg`.

use clip_core::{ArgValue, Clip, Command};
use log::{info, warn};

use crate::print::{describe_args, mem_dump, COLOR_GREEN, COLOR_RESET};
use crate::{AppContext, MEMORY_SIZE, PIN_COUNT};

const ADC_RESOLUTION: u32 = 4096;

fn trace_call(command: &Command<AppContext>, args: &[ArgValue<'_>]) {
    println!("{COLOR_GREEN}{}{COLOR_RESET}", describe_args(command.name, args));
}

// The binder guarantees declared argument types, so a mismatch only means "absent".
fn uint_at(args: &[ArgValue<'_>], index: usize) -> Option<u32> {
    args.get(index).and_then(ArgValue::as_uint)
}

fn pin_index(pin: u32) -> Option<usize> {
    let index = usize::try_from(pin).ok().filter(|&i| i < PIN_COUNT);
    if index.is_none() {
        warn!("pin {pin} out of range (0..{PIN_COUNT})");
    }
    index
}

// ===== GPIO =====

pub fn gpio_get_pin(
    _clip: &Clip<AppContext>,
    command: &Command<AppContext>,
    args: &[ArgValue<'_>],
    ctx: &mut AppContext,
) {
    trace_call(command, args);
    if let Some(index) = uint_at(args, 0).and_then(pin_index) {
        println!("pin[{index}] = {}", ctx.pins[index]);
    }
}

pub fn gpio_set_pin(
    _clip: &Clip<AppContext>,
    command: &Command<AppContext>,
    args: &[ArgValue<'_>],
    ctx: &mut AppContext,
) {
    trace_call(command, args);
    if let (Some(index), Some(state)) = (uint_at(args, 0).and_then(pin_index), uint_at(args, 1)) {
        ctx.pins[index] = state;
    }
}

pub fn gpio_get_reg(
    _clip: &Clip<AppContext>,
    command: &Command<AppContext>,
    args: &[ArgValue<'_>],
    ctx: &mut AppContext,
) {
    trace_call(command, args);
    if let Some(address) = uint_at(args, 0) {
        let value = ctx.registers.get(&address).copied().unwrap_or(0);
        println!("reg[0x{address:08X}] = 0x{value:08X}");
    }
}

pub fn gpio_set_reg(
    _clip: &Clip<AppContext>,
    command: &Command<AppContext>,
    args: &[ArgValue<'_>],
    ctx: &mut AppContext,
) {
    trace_call(command, args);
    if let (Some(address), Some(value)) = (uint_at(args, 0), uint_at(args, 1)) {
        ctx.registers.insert(address, value);
    }
}

pub fn gpio_test(
    _clip: &Clip<AppContext>,
    command: &Command<AppContext>,
    args: &[ArgValue<'_>],
    _ctx: &mut AppContext,
) {
    trace_call(command, args);
}

// ===== ADC =====

pub fn adc_read(
    _clip: &Clip<AppContext>,
    command: &Command<AppContext>,
    args: &[ArgValue<'_>],
    ctx: &mut AppContext,
) {
    trace_call(command, args);
    if !ctx.sampling {
        warn!("adc read while sampling is stopped");
    }
    if let Some(channel) = uint_at(args, 0) {
        let raw = ctx.next_random() % ADC_RESOLUTION;
        let volts = raw as f32 * ctx.vref / ADC_RESOLUTION as f32;
        println!("adc[{channel}] = {raw} ({volts:.3} V)");
    }
}

pub fn adc_set(
    _clip: &Clip<AppContext>,
    command: &Command<AppContext>,
    args: &[ArgValue<'_>],
    ctx: &mut AppContext,
) {
    trace_call(command, args);
    if let Some(vref) = args.first().and_then(ArgValue::as_float) {
        ctx.vref = vref;
        println!("vref = {vref:.3}");
    }
}

pub fn adc_start(
    _clip: &Clip<AppContext>,
    command: &Command<AppContext>,
    args: &[ArgValue<'_>],
    ctx: &mut AppContext,
) {
    trace_call(command, args);
    ctx.sampling = true;
    println!("started...");
}

pub fn adc_stop(
    _clip: &Clip<AppContext>,
    command: &Command<AppContext>,
    args: &[ArgValue<'_>],
    ctx: &mut AppContext,
) {
    trace_call(command, args);
    ctx.sampling = false;
    println!("stopped...");
}

// ===== MEMORY =====

pub fn mem_write(
    _clip: &Clip<AppContext>,
    command: &Command<AppContext>,
    args: &[ArgValue<'_>],
    ctx: &mut AppContext,
) {
    trace_call(command, args);
    let data = args.get(1).and_then(ArgValue::as_hex_array);
    if let (Some(address), Some(data)) = (uint_at(args, 0), data) {
        ctx.write_memory(address, data);
        print!("{}", mem_dump(address, data));
    }
}

pub fn mem_read(
    _clip: &Clip<AppContext>,
    command: &Command<AppContext>,
    args: &[ArgValue<'_>],
    ctx: &mut AppContext,
) {
    trace_call(command, args);
    if let (Some(address), Some(size)) = (uint_at(args, 0), uint_at(args, 1)) {
        let size = clamp_size(size);
        let data = ctx.read_memory(address, size);
        print!("{}", mem_dump(address, &data));
    }
}

// Memory wraps, so a longer read would only repeat it.
fn clamp_size(size: u32) -> usize {
    let clamped = usize::try_from(size).map_or(MEMORY_SIZE, |size| size.min(MEMORY_SIZE));
    if clamped as u64 != u64::from(size) {
        warn!("read size {size} clamped to {MEMORY_SIZE}");
    }
    clamped
}

// ===== APPLICATION =====

pub fn exit(
    _clip: &Clip<AppContext>,
    command: &Command<AppContext>,
    args: &[ArgValue<'_>],
    ctx: &mut AppContext,
) {
    trace_call(command, args);
    info!("exit requested");
    ctx.exit_requested = true;
}

#[cfg(test)]
mod commands_tests {
    use super::*;
    use clip_core::HexArray;

    static NO_COMMANDS: [Command<AppContext>; 0] = [];
    static CLIP: Clip<AppContext> = Clip::new(&NO_COMMANDS);
    static CMD: Command<AppContext> = Command::terminal("test", None, &[], None);

    #[test]
    fn test_gpio_pin_state_is_stored() {
        let mut ctx = AppContext::default();
        gpio_set_pin(&CLIP, &CMD, &[ArgValue::Uint(3), ArgValue::Uint(1)], &mut ctx);
        assert_eq!(ctx.pins[3], 1);
    }

    #[test]
    fn test_gpio_pin_out_of_range_is_ignored() {
        let mut ctx = AppContext::default();
        gpio_set_pin(&CLIP, &CMD, &[ArgValue::Uint(PIN_COUNT as u32), ArgValue::Uint(1)], &mut ctx);
        assert!(ctx.pins.iter().all(|&p| p == 0));
    }

    #[test]
    fn test_gpio_register_is_stored() {
        let mut ctx = AppContext::default();
        gpio_set_reg(&CLIP, &CMD, &[ArgValue::Uint(0x4000), ArgValue::Uint(0xFF)], &mut ctx);
        assert_eq!(ctx.registers.get(&0x4000), Some(&0xFF));
    }

    #[test]
    fn test_adc_start_stop_and_vref() {
        let mut ctx = AppContext::default();
        adc_start(&CLIP, &CMD, &[], &mut ctx);
        assert!(ctx.sampling);
        adc_set(&CLIP, &CMD, &[ArgValue::Float(1.8)], &mut ctx);
        assert_eq!(ctx.vref, 1.8);
        adc_stop(&CLIP, &CMD, &[], &mut ctx);
        assert!(!ctx.sampling);
    }

    #[test]
    fn test_mem_write_lands_in_memory() {
        let mut ctx = AppContext::default();
        let encoded = [3u8, 0xDE, 0xAD, 0x01];
        let args = [ArgValue::Uint(8), ArgValue::HexArray(HexArray::from_encoded(&encoded))];
        mem_write(&CLIP, &CMD, &args, &mut ctx);
        assert_eq!(&ctx.memory[8..11], &[0xDE, 0xAD, 0x01]);
    }

    #[test]
    fn test_read_size_is_clamped_to_memory() {
        assert_eq!(clamp_size(u32::MAX), MEMORY_SIZE);
        assert_eq!(clamp_size(MEMORY_SIZE as u32 + 1), MEMORY_SIZE);
        assert_eq!(clamp_size(16), 16);
    }

    #[test]
    fn test_mem_read_huge_size_completes() {
        let mut ctx = AppContext::default();
        ctx.write_memory(0, b"ok");
        mem_read(&CLIP, &CMD, &[ArgValue::Uint(0), ArgValue::Uint(u32::MAX)], &mut ctx);
        assert_eq!(&ctx.memory[..2], b"ok");
    }

    #[test]
    fn test_exit_sets_flag() {
        let mut ctx = AppContext::default();
        exit(&CLIP, &CMD, &[], &mut ctx);
        assert!(ctx.exit_requested);
    }
}
