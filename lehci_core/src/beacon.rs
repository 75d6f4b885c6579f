use crate::advertising::{ad_type, AdvertisingData, AdvertisingDataBuilder, AdvertisingError};
use crate::byte_order::{htobs, twos_complement};
use crate::command::{
    CommandPacket, SetAdvertiseEnable, SetAdvertisingData, SetAdvertisingParameters,
};
use crate::Result;
use uuid::Uuid;

// Flags: LE General Discoverable, BR/EDR not supported, simultaneous LE and
// BR/EDR (host).
const FLAGS: u8 = 0x1A;
// Apple, Inc.
const COMPANY_ID: u16 = 0x004C;
// iBeacon type followed by the length of the remaining beacon fields.
const BEACON_TYPE: [u8; 2] = [0x02, 0x15];
const CALIBRATION_BITS: u32 = 8;

const DEFAULT_RSSI: i8 = -59;
const DEFAULT_INTERVAL: u16 = 100;

#[derive(Clone, Debug, Default)]
pub struct BeaconConfig {
    pub uuid: Option<Uuid>,
    pub major: Option<u16>,
    pub minor: Option<u16>,
    // Calibrated transmit power at 1 meter, in dBm.
    pub rssi: Option<i8>,
    // Advertising interval, in 0.625 ms units.
    pub interval: Option<u16>,
}

/// A proximity beacon identity and its advertising settings.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Beacon {
    uuid: Uuid,
    major: u16,
    minor: u16,
    rssi: i8,
    interval: u16,
}

impl Beacon {
    pub fn new(uuid: Uuid, major: u16, minor: u16, rssi: i8) -> Self {
        Self {
            uuid,
            major,
            minor,
            rssi,
            interval: DEFAULT_INTERVAL,
        }
    }

    pub fn with_config(config: BeaconConfig) -> Self {
        Self {
            uuid: config.uuid.unwrap_or_else(Uuid::new_v4),
            major: config.major.unwrap_or(0),
            minor: config.minor.unwrap_or(0),
            rssi: config.rssi.unwrap_or(DEFAULT_RSSI),
            interval: config.interval.unwrap_or(DEFAULT_INTERVAL),
        }
    }

    pub fn with_uuid_bytes(uuid: &[u8], major: u16, minor: u16, rssi: i8) -> Result<Self> {
        let uuid = Uuid::from_slice(uuid)
            .map_err(|_| AdvertisingError::InvalidUuidLength(uuid.len()))?;
        Ok(Self::new(uuid, major, minor, rssi))
    }

    pub fn uuid(&self) -> &Uuid {
        &self.uuid
    }

    pub fn major(&self) -> u16 {
        self.major
    }

    pub fn minor(&self) -> u16 {
        self.minor
    }

    pub fn rssi(&self) -> i8 {
        self.rssi
    }

    pub fn interval(&self) -> u16 {
        self.interval
    }

    pub fn advertising_data(&self) -> Result<AdvertisingData> {
        encode_beacon(self.uuid.as_bytes(), self.major, self.minor, self.rssi)
    }

    /// Commands that start advertising this beacon, in order: advertising
    /// parameters, advertise enable, advertising data.
    pub fn commands(&self) -> Result<Vec<CommandPacket>> {
        let parameters = SetAdvertisingParameters {
            interval_min: self.interval,
            interval_max: self.interval,
            ..Default::default()
        };
        Ok(vec![
            CommandPacket::new(&parameters)?,
            CommandPacket::new(&SetAdvertiseEnable { enabled: true })?,
            CommandPacket::new(&SetAdvertisingData(self.advertising_data()?))?,
        ])
    }
}

/// Encodes the iBeacon advertising payload for the given identity.
///
/// `uuid` is copied verbatim and must be exactly 16 bytes. Major and minor go
/// out big-endian; the company identifier is little-endian like every other
/// multi-byte advertising field.
pub fn encode_beacon(
    uuid: &[u8],
    major: u16,
    minor: u16,
    calibrated_tx_power: i8,
) -> Result<AdvertisingData> {
    if uuid.len() != 16 {
        return Err(AdvertisingError::InvalidUuidLength(uuid.len()).into());
    }
    let mut builder = AdvertisingDataBuilder::new();
    builder.push_segment(ad_type::FLAGS, &[FLAGS])?;

    let mut body = Vec::with_capacity(25);
    body.extend_from_slice(&htobs(COMPANY_ID).to_ne_bytes());
    body.extend_from_slice(&BEACON_TYPE);
    body.extend_from_slice(uuid);
    body.extend_from_slice(&major.to_be_bytes());
    body.extend_from_slice(&minor.to_be_bytes());
    body.push(twos_complement(calibrated_tx_power.into(), CALIBRATION_BITS) as u8);
    builder.push_segment(ad_type::MANUFACTURER_SPECIFIC, &body)?;

    let data = builder.build();
    tracing::debug!(major, minor, calibrated_tx_power, len = data.len(), "encoded beacon data");
    Ok(data)
}
