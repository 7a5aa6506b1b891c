//! Integration tests: exercise the resolve-then-encode pipeline the
//! way the CLI drives it, over simulated device lists.

#[cfg(test)]
mod tests {
    use crate::configure::Settings;
    use crate::error::Error;
    use crate::protocol::{DpiLevel, SampleRate};
    use crate::select::fake::FakeDevice;
    use crate::select::{self, Candidate};
    use crate::usb::DeviceAddress;

    /// Two mice connected; `set --sample-rate 500` without `--address`
    /// must fail with a message pointing at the flag.
    #[test]
    fn ambiguous_set_names_the_address_flag() {
        let devices = [FakeDevice::mouse(1, 4), FakeDevice::mouse(1, 7)];

        let err = select::find_sole(&devices).unwrap_err();
        assert!(err.to_string().contains("--address"));
        assert!(matches!(err, Error::Ambiguous { count: 2 }));
    }

    /// One mouse at 2.3; `set --dpi-level 3` resolves it and encodes
    /// the documented transfer.
    #[test]
    fn sole_device_dpi_write_encodes_expected_transfer() {
        let devices = [FakeDevice::other(1, 1), FakeDevice::mouse(2, 3)];

        let device = select::find_sole(&devices).unwrap();
        assert_eq!(device.address(), DeviceAddress { bus: 2, dev: 3 });

        let settings = Settings {
            sample_rate: None,
            dpi_level: DpiLevel::new(3),
        };
        let requests = settings.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].request_type, 0x21);
        assert_eq!(requests[0].request, 9);
        assert_eq!(requests[0].value, 0x038E);
        assert_eq!(requests[0].index, 1);
        assert_eq!(requests[0].data, [0x8E, 0x05]);
    }

    /// `set --address 9.9` with nothing at that address.
    #[test]
    fn missing_address_reports_the_address() {
        let devices = [FakeDevice::mouse(1, 4)];

        let address: DeviceAddress = "9.9".parse().unwrap();
        let err = select::find_by_address(&devices, address).unwrap_err();
        assert_eq!(err.to_string(), "could not find device 9.9");
    }

    /// `set --address` pointing at a hub rather than the mouse.
    #[test]
    fn wrong_device_at_address_reports_product_mismatch() {
        let devices = [FakeDevice::other(1, 2), FakeDevice::mouse(1, 4)];

        let address: DeviceAddress = "1.2".parse().unwrap();
        let err = select::find_by_address(&devices, address).unwrap_err();
        assert_eq!(
            err.to_string(),
            "device 1.2 is not a Logitech Gaming Mouse G400"
        );
    }

    /// Full `set` with both flags resolves by address and encodes both
    /// transfers in order.
    #[test]
    fn addressed_set_with_both_settings() {
        let devices = [
            FakeDevice::mouse(1, 4),
            FakeDevice::mouse(1, 7),
            FakeDevice::other(2, 1),
        ];

        let address: DeviceAddress = "1.7".parse().unwrap();
        let device = select::find_by_address(&devices, address).unwrap();
        assert_eq!(device.address(), address);

        let settings = Settings {
            sample_rate: SampleRate::from_hz(1000),
            dpi_level: DpiLevel::new(1),
        };
        let requests = settings.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].value, 0x0320);
        assert_eq!(requests[0].data, [0x20, 0x00]);
        assert_eq!(requests[1].value, 0x038E);
        assert_eq!(requests[1].data, [0x8E, 0x03]);
    }
}
