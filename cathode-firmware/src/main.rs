//! Cathode - six-tube Nixie clock firmware
//!
//! Main firmware binary for RP2040-based boards. A 625 Hz heartbeat on
//! the interrupt executor runs the whole control plane (display PWM,
//! button scan, event timers, music player, timekeeping); the thread
//! executor runs the encoder edge task, the serial pump and the UI.
//!
//! Board wiring:
//!
//! ```text
//! GPIO 0/1     UART0 TX/RX (38400 8N1 terminal)
//! GPIO 2..7    panel buttons 0..5 (active low)
//! GPIO 8/9     left/right knob push buttons (active low)
//! GPIO 10/11   left encoder A/B
//! GPIO 12/13   right encoder A/B
//! GPIO 16      piezo beeper (PWM slice 0 A)
//! GPIO 18/19   SPI0 SCK/MOSI to the HV driver cascade
//! GPIO 20      driver latch
//! GPIO 21      driver output enable
//! ```

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::spi::Spi;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use cathode_core::config::BAUD_RATE;
use cathode_core::display::refresh::set_display_enabled;
use cathode_core::display::DisplayStream;
use cathode_hal_rp2040::display::ShiftRegisterBus;
use cathode_hal_rp2040::gpio::{RpInput, RpOutput};
use cathode_hal_rp2040::spi::{driver_spi_config, RpSpi};
use cathode_hal_rp2040::tone::PwmTone;
use cathode_hal_rp2040::uart::{RpUartRx, RpUartTx};

mod console;
mod events;
mod shared;
mod splash;
mod tasks;
mod ui;

use shared::{BANK, CLOCK, PRIMARY, REFRESH, SECONDARY};
use tasks::{ButtonInputs, TickHardware};

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// The heartbeat runs on its own interrupt executor so it preempts the
// application like a hardware timer ISR
static TICK_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    TICK_EXECUTOR.on_interrupt()
}

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Cathode firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Display driver bus: SPI0 in mode 2 plus latch and output-enable
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, driver_spi_config());
    let latch = RpOutput::new(Output::new(p.PIN_20, Level::Low));
    let enable = RpOutput::new(Output::new(p.PIN_21, Level::Low));
    let mut bus = ShiftRegisterBus::new(RpSpi::new(spi), latch, enable);

    // Beeper on PWM slice 0
    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, PwmConfig::default());
    let tone = PwmTone::new(pwm);

    // Panel buttons and knob pushes, scan order bit 0 upward
    let buttons = ButtonInputs::new([
        RpInput::new(Input::new(p.PIN_2, Pull::Up)),
        RpInput::new(Input::new(p.PIN_3, Pull::Up)),
        RpInput::new(Input::new(p.PIN_4, Pull::Up)),
        RpInput::new(Input::new(p.PIN_5, Pull::Up)),
        RpInput::new(Input::new(p.PIN_6, Pull::Up)),
        RpInput::new(Input::new(p.PIN_7, Pull::Up)),
        RpInput::new(Input::new(p.PIN_8, Pull::Up)),
        RpInput::new(Input::new(p.PIN_9, Pull::Up)),
    ]);

    // Rotary encoder channels
    let left_a = Input::new(p.PIN_10, Pull::Up);
    let left_b = Input::new(p.PIN_11, Pull::Up);
    let right_a = Input::new(p.PIN_12, Pull::Up);
    let right_b = Input::new(p.PIN_13, Pull::Up);

    // Serial terminal
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BAUD_RATE;
    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (uart_tx, uart_rx) = uart.split();

    info!("Peripherals initialized");

    // Virtual displays over the two bank buffers; primary is shown
    let primary = DisplayStream::new(BANK.buffer(PRIMARY));
    let secondary = DisplayStream::new(BANK.buffer(SECONDARY));
    BANK.show(PRIMARY);
    set_display_enabled(&REFRESH, &mut bus, true);

    CLOCK.lock(|c| c.borrow_mut().set_running(true));

    // Heartbeat on the high-priority executor
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let tick_spawner = TICK_EXECUTOR.start(interrupt::SWI_IRQ_1);
    tick_spawner
        .spawn(tasks::tick_task(TickHardware { bus, tone, buttons }))
        .unwrap();

    // Application tasks
    spawner
        .spawn(tasks::rotary_task(left_a, left_b, right_a, right_b))
        .unwrap();
    spawner
        .spawn(tasks::serial_task(
            RpUartTx::new(uart_tx),
            RpUartRx::new(uart_rx),
        ))
        .unwrap();
    spawner.spawn(ui_task(primary, secondary)).unwrap();

    info!("All tasks spawned, clock running");

    // Nothing else to do here; keep a slow heartbeat for the logs
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Splash sequence, then the clock loop forever
#[embassy_executor::task]
async fn ui_task(mut primary: DisplayStream<'static>, mut secondary: DisplayStream<'static>) {
    splash::sign_on().await;
    splash::start_demo_score();
    splash::display_test(&mut secondary).await;

    // Whatever input ended the splash should not leak into clock mode
    events::clear_events();

    ui::clock::clock_display(&mut primary, &mut secondary).await
}
