//! Raspberry Pi Pico - "T&J's Quibble"
//!
//! Joystick: up GP2, down GP3, left GP4, right GP5, centre GP6 (fire)
//! Buttons: left GP12 (skip room), right GP13 (pause / confirm)
//! Pots: GP26 (speed), GP27 (wall drift)
//! Indicator LEDs: GP25, GP22 (blink while super mode runs)
//! UART0 (GP0 TX, GP1 RX): room-load exchange, telemetry, key injection
//! USB: log output

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel as AdcChannel};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::{UART0, USB};
use embassy_rp::spi::{self, Spi};
use embassy_rp::uart::{self, Async, Uart, UartRx, UartTx};
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};
use embassy_rp::{Peri, bind_interrupts};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Delay, Duration, Instant, Ticker, Timer};
use embedded_graphics::pixelcolor::{BinaryColor, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_hal_bus::spi::ExclusiveDevice;
use mipidsi::Builder;
use mipidsi::models::ST7789;
use mipidsi::options::{ColorInversion, Orientation, Rotation};
use quibble::config::{FAST_TICK_US, FRAME_MS, MEDIUM_TICK_US, SCREEN_H, SCREEN_W};
use quibble::debounce::Switches;
use quibble::render;
use quibble::rng::Rng;
use quibble::scheduler::SLOW_TICK_US;
use quibble::telemetry::scale_analog;
use quibble::{Analog, FastTask, Game, GameState, Link, MediumTask, SharedState};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

// --- Panel ---
const PANEL_W: i32 = 240;
const PANEL_H: i32 = 135;
const SCALE: i32 = 2;
const ORIGIN_X: i32 = (PANEL_W - SCREEN_W * SCALE) / 2;
const ORIGIN_Y: i32 = (PANEL_H - SCREEN_H * SCALE) / 2;

// --- Serial ---
const BAUD: u32 = 9600;
const RX_DEPTH: usize = 256;
/// Pause before a room-load exchange so the host can start sending.
const ROOM_LOAD_DELAY: Duration = Duration::from_secs(2);

const ADC_FULL_SCALE: u16 = 4095;

static SHARED: SharedState = SharedState::new();
static RX: Channel<CriticalSectionRawMutex, u8, RX_DEPTH> = Channel::new();

// --- Embassy bindings ---
bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => UsbInterruptHandler<USB>;
    UART0_IRQ => uart::InterruptHandler<UART0>;
    ADC_IRQ_FIFO => adc::InterruptHandler;
});

/// The seven switches, all active-low with pull-ups.
struct Switchboard {
    up: Input<'static>,
    down: Input<'static>,
    left: Input<'static>,
    right: Input<'static>,
    center: Input<'static>,
    btn_left: Input<'static>,
    btn_right: Input<'static>,
}

impl Switchboard {
    fn sample(&self) -> Switches {
        Switches::from_levels([
            self.up.is_low(),
            self.down.is_low(),
            self.left.is_low(),
            self.right.is_low(),
            self.center.is_low(),
            self.btn_left.is_low(),
            self.btn_right.is_low(),
        ])
    }
}

/// Speed and drift knobs.
struct Pots {
    adc: Adc<'static, adc::Async>,
    left: AdcChannel<'static>,
    right: AdcChannel<'static>,
}

impl Pots {
    async fn read(&mut self) -> Analog {
        let left = self.adc.read(&mut self.left).await.unwrap_or(0);
        let right = self.adc.read(&mut self.right).await.unwrap_or(0);
        Analog {
            left: scale_analog(left, ADC_FULL_SCALE),
            right: scale_analog(right, ADC_FULL_SCALE),
        }
    }
}

/// UART transmit half plus the bytes the receive task has queued.
struct SerialLink {
    tx: UartTx<'static, Async>,
}

impl Link for SerialLink {
    fn read_byte(&mut self) -> Option<u8> {
        RX.try_receive().ok()
    }

    fn write(&mut self, bytes: &[u8]) {
        if let Err(e) = self.tx.blocking_write(bytes) {
            log::warn!("uart write: {:?}", e);
        }
    }
}

/// Draws the 84×48 monochrome frame at 2× in the middle of the panel.
struct Scaled<'a, D> {
    panel: &'a mut D,
}

fn panel_colour(c: BinaryColor) -> Rgb565 {
    match c {
        BinaryColor::On => Rgb565::WHITE,
        BinaryColor::Off => Rgb565::BLACK,
    }
}

impl<D: DrawTarget<Color = Rgb565>> OriginDimensions for Scaled<'_, D> {
    fn size(&self) -> Size {
        Size::new(SCREEN_W as u32, SCREEN_H as u32)
    }
}

impl<D: DrawTarget<Color = Rgb565>> DrawTarget for Scaled<'_, D> {
    type Color = BinaryColor;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if p.x < 0 || p.y < 0 || p.x >= SCREEN_W || p.y >= SCREEN_H {
                continue;
            }
            let area = Rectangle::new(
                Point::new(ORIGIN_X + p.x * SCALE, ORIGIN_Y + p.y * SCALE),
                Size::new_equal(SCALE as u32),
            );
            self.panel.fill_solid(&area, panel_colour(c))?;
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let area = Rectangle::new(
            Point::new(ORIGIN_X, ORIGIN_Y),
            Size::new((SCREEN_W * SCALE) as u32, (SCREEN_H * SCALE) as u32),
        );
        self.panel.fill_solid(&area, panel_colour(color))
    }
}

#[embassy_executor::task]
async fn logger_task(driver: Driver<'static, USB>) {
    embassy_usb_logger::run!(1024, log::LevelFilter::Info, driver);
}

/// ~30 Hz: super-mode indicator.
#[embassy_executor::task]
async fn fast_task(mut led_a: Output<'static>, mut led_b: Output<'static>) {
    let mut task = FastTask::default();
    let mut ticker = Ticker::every(Duration::from_micros(FAST_TICK_US));
    loop {
        let lit = Level::from(task.run(&SHARED));
        led_a.set_level(lit);
        led_b.set_level(lit);
        ticker.next().await;
    }
}

/// Debounce and wall-drift pacing.
#[embassy_executor::task]
async fn medium_task(switches: Switchboard) {
    let mut task = MediumTask::default();
    let mut ticker = Ticker::every(Duration::from_micros(MEDIUM_TICK_US));
    loop {
        task.run(&SHARED, switches.sample());
        ticker.next().await;
    }
}

/// 64 Hz game clock.
#[embassy_executor::task]
async fn slow_task() {
    let mut ticker = Ticker::every(Duration::from_micros(SLOW_TICK_US));
    loop {
        SHARED.clock_tick();
        ticker.next().await;
    }
}

#[embassy_executor::task]
async fn uart_rx_task(mut rx: UartRx<'static, Async>) {
    let mut byte = [0u8; 1];
    loop {
        match rx.read(&mut byte).await {
            Ok(()) => {
                if RX.try_send(byte[0]).is_err() {
                    log::warn!("serial rx full, dropped {:#04x}", byte[0]);
                }
            }
            Err(e) => log::warn!("uart read: {:?}", e),
        }
    }
}

/// Block on the welcome / game-over screen until the right button is pressed.
async fn wait_for_confirm(game: &mut Game) {
    loop {
        if game.poll_confirm(SHARED.switches()) {
            return;
        }
        Timer::after(Duration::from_millis(FRAME_MS)).await;
    }
}

fn input(pin: Peri<'static, impl embassy_rp::gpio::Pin>) -> Input<'static> {
    Input::new(pin, Pull::Up)
}

// --- Main ---
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // USB serial logger
    let usb_driver = Driver::new(p.USB, Irqs);
    unwrap!(spawner.spawn(logger_task(usb_driver)));
    Timer::after(Duration::from_secs(2)).await;
    log::info!("=== T&J's Quibble ===");

    // Indicators
    let led_a = Output::new(p.PIN_25, Level::Low);
    let led_b = Output::new(p.PIN_22, Level::Low);

    // ST7789 display (Pico Display Pack)
    let _bl = Output::new(p.PIN_20, Level::High);
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 62_500_000;
    let spi_bus = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs_display = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let spi_device = ExclusiveDevice::new_no_delay(spi_bus, cs_display).unwrap();
    static DISPLAY_BUF: StaticCell<[u8; 1024]> = StaticCell::new();
    let display_buf = DISPLAY_BUF.init([0u8; 1024]);
    let di = mipidsi::interface::SpiInterface::new(spi_device, dc, display_buf);
    let mut display = Builder::new(ST7789, di)
        .display_size(135, 240)
        .display_offset(52, 40)
        .invert_colors(ColorInversion::Inverted)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .init(&mut Delay)
        .unwrap();
    display.clear(Rgb565::BLACK).unwrap();
    log::info!("Display ready!");

    // Joystick and buttons
    let switches = Switchboard {
        up: input(p.PIN_2),
        down: input(p.PIN_3),
        left: input(p.PIN_4),
        right: input(p.PIN_5),
        center: input(p.PIN_6),
        btn_left: input(p.PIN_12),
        btn_right: input(p.PIN_13),
    };

    // Serial link
    let mut uart_config = uart::Config::default();
    uart_config.baudrate = BAUD;
    let uart = Uart::new(
        p.UART0, p.PIN_0, p.PIN_1, Irqs, p.DMA_CH0, p.DMA_CH1, uart_config,
    );
    let (tx, rx) = uart.split();
    let mut link = SerialLink { tx };

    unwrap!(spawner.spawn(fast_task(led_a, led_b)));
    unwrap!(spawner.spawn(medium_task(switches)));
    unwrap!(spawner.spawn(slow_task()));
    unwrap!(spawner.spawn(uart_rx_task(rx)));

    // Pots
    let mut pots = Pots {
        adc: Adc::new(p.ADC, Irqs, adc::Config::default()),
        left: AdcChannel::new_pin(p.PIN_26, Pull::None),
        right: AdcChannel::new_pin(p.PIN_27, Pull::None),
    };
    let analog = pots.read().await;
    let rng = Rng::from_entropy(analog.left, analog.right, &SHARED.counters());
    let mut game = Game::new(rng);
    let mut prev_state = None;

    log::info!("Entering game loop");

    loop {
        let frame_start = Instant::now();
        let state = game.state();

        match state {
            GameState::Welcome | GameState::GameOver => {
                if prev_state != Some(state) {
                    display.clear(Rgb565::BLACK).unwrap();
                    let mut screen = Scaled {
                        panel: &mut display,
                    };
                    if state == GameState::Welcome {
                        render::draw_welcome(&mut screen).unwrap();
                    } else {
                        render::draw_game_over(&mut screen, game.world.jerry.score).unwrap();
                    }
                    prev_state = Some(state);
                    log::info!("{:?} screen", state);
                }
                wait_for_confirm(&mut game).await;
                link.flush_input();
                game.confirm(&SHARED);
            }

            GameState::Running | GameState::Pause => {
                prev_state = Some(state);
                let snap = SHARED.snapshot();
                let analog = pots.read().await;
                let report = game.tick(&snap, analog, &SHARED, &mut link);
                if report.room_load {
                    Timer::after(ROOM_LOAD_DELAY).await;
                    let loaded = game.load_room(&mut link);
                    log::info!("room {} ready, {} walls", game.world.level, loaded.walls);
                }
                let mut screen = Scaled {
                    panel: &mut display,
                };
                render::draw_frame(&mut screen, &game.world, snap.time).unwrap();
            }
        }

        Timer::at(frame_start + Duration::from_millis(FRAME_MS)).await;
    }
}
