#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
#[avr_device::entry]
fn main() -> ! {
    use press_monitor::hal::{Mega2560, Power};
    use press_monitor::Monitor;

    let dp = avr_device::atmega2560::Peripherals::take().unwrap();
    let mut monitor = Monitor::new(Mega2560::peripherals(dp));
    let mut power = Power::new();

    // Enable interrupts globally
    unsafe { avr_device::interrupt::enable() };

    monitor.start();

    loop {
        // Nothing due: sleep until the next millisecond interrupt
        if monitor.poll().is_none() {
            power.enter_idle_mode();
        }
    }
}

/// Host build: replay a scripted session against the simulated board.
#[cfg(not(target_arch = "avr"))]
fn main() {
    use press_monitor::sim::SimRig;

    let rig = SimRig::new();
    let mut monitor = rig.monitor();
    monitor.start();

    // One long press, then two short ones, inside the first full window.
    rig.press();
    rig.run_for(&mut monitor, 700);
    rig.release();
    rig.run_for(&mut monitor, 2800);
    for _ in 0..2 {
        rig.press();
        rig.run_for(&mut monitor, 200);
        rig.release();
        rig.run_for(&mut monitor, 800);
    }
    rig.run_for(&mut monitor, 10_000);

    print!("{}", &*rig.terminal.text());
}
