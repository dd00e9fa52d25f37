//! One-shot hardware peripheral initialization.
//!
//! Configures the ADC oneshot unit and installs the TWAI (CAN) driver
//! using raw ESP-IDF sys calls.  GPIO pins are owned by `esp-idf-hal`
//! `PinDriver`s created in `main()`.  Called once before the event loop.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    TwaiInstallFailed(i32),
    TwaiStartFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::TwaiInstallFailed(rc) => write!(f, "TWAI driver install failed (rc={})", rc),
            Self::TwaiStartFailed(rc) => write!(f, "TWAI start failed (rc={})", rc),
        }
    }
}

impl From<HwInitError> for crate::error::Error {
    fn from(e: HwInitError) -> Self {
        match e {
            HwInitError::AdcInitFailed(_) => Self::Init("ADC"),
            HwInitError::TwaiInstallFailed(_) | HwInitError::TwaiStartFailed(_) => Self::Init("TWAI"),
        }
    }
}

#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before event loop; single-threaded.
    unsafe {
        init_adc()?;
        init_twai()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.  `init_adc()` completes before the event loop
/// starts, so there is no concurrent access.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for channel in [pins::TEMP_ADC_CHANNEL, pins::POT_ADC_CHANNEL] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::AdcInitFailed(ret));
        }
    }

    info!(
        "hw_init: ADC1 configured (CH{}=temp, CH{}=pot)",
        pins::TEMP_ADC_CHANNEL,
        pins::POT_ADC_CHANNEL
    );
    Ok(())
}

/// Raw 12-bit ADC1 reading.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> Result<u16, crate::error::SensorError> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract: single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return Err(crate::error::SensorError::AdcReadFailed(ret));
    }
    Ok(raw.max(0) as u16)
}

// ── TWAI (CAN) ────────────────────────────────────────────────

/// TWAI alerts the receive thread waits on.
#[cfg(target_os = "espidf")]
pub const TWAI_RX_ALERTS: u32 = TWAI_ALERT_RX_DATA | TWAI_ALERT_BUS_OFF | TWAI_ALERT_RX_QUEUE_FULL;

#[cfg(target_os = "espidf")]
unsafe fn init_twai() -> Result<(), HwInitError> {
    // 125 kbit/s, accept-all filter, normal mode.
    let g_config = twai_general_config_t {
        mode: twai_mode_t_TWAI_MODE_NORMAL,
        tx_io: pins::TWAI_TX_GPIO,
        rx_io: pins::TWAI_RX_GPIO,
        clkout_io: -1,
        bus_off_io: -1,
        tx_queue_len: 4,
        rx_queue_len: 8,
        alerts_enabled: TWAI_RX_ALERTS,
        clkout_divider: 0,
        intr_flags: ESP_INTR_FLAG_LEVEL1 as i32,
        ..Default::default()
    };
    let t_config = twai_timing_config_t {
        brp: 32,
        tseg_1: 15,
        tseg_2: 4,
        sjw: 3,
        triple_sampling: false,
        ..Default::default()
    };
    let f_config = twai_filter_config_t {
        acceptance_code: 0,
        acceptance_mask: 0xFFFF_FFFF,
        single_filter: true,
    };

    let ret = unsafe { twai_driver_install(&g_config, &t_config, &f_config) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::TwaiInstallFailed(ret));
    }
    let ret = unsafe { twai_start() };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::TwaiStartFailed(ret));
    }

    info!("hw_init: TWAI started (tx=GPIO{}, rx=GPIO{})", pins::TWAI_TX_GPIO, pins::TWAI_RX_GPIO);
    Ok(())
}
