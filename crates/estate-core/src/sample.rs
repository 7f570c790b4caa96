//! Sample address book used by `eb init --sample`.

use crate::book::{AddressBook, Result};
use crate::contact::ContactBuilder;
use crate::enums::{ContactStatus, PropertyStatus};
use crate::property::PropertyBuilder;

/// Returns a small, fully linked book for demos.
pub fn sample_book() -> Result<AddressBook> {
    let contacts = vec![
        ContactBuilder::new("Alex Yeoh", "87438807", "alexyeoh@example.com")
            .id(1)
            .address("Blk 30 Geylang Street 29, #06-40")
            .budget(Some(500_000), Some(800_000))
            .tag("firsttimer")
            .buying([2])
            .build()?,
        ContactBuilder::new("Bernice Yu", "99272758", "berniceyu@example.com")
            .id(2)
            .address("Blk 30 Lorong 3 Serangoon Gardens, #07-18")
            .tag("investor")
            .selling([1, 2])
            .build()?,
        ContactBuilder::new("Charlotte Oliveiro", "93210283", "charlotte@example.com")
            .id(3)
            .budget(None, Some(1_500_000))
            .buying([1])
            .build()?,
        ContactBuilder::new("David Li", "91031282", "lidavid@example.com")
            .id(4)
            .address("Blk 436 Serangoon Gardens Street 26, #16-43")
            .status(ContactStatus::Inactive)
            .build()?,
    ];
    let properties = vec![
        PropertyBuilder::new("18 Tanjong Rhu Road", "436895", 1_380_000)
            .id(1)
            .floor_area(120)
            .rooms(3, 2)
            .tag("seaview")
            .buyers([3])
            .sellers([2])
            .build()?,
        PropertyBuilder::new("Blk 123 Bishan Street 12, #05-22", "570123", 650_000)
            .id(2)
            .floor_area(93)
            .rooms(3, 2)
            .status(PropertyStatus::Pending)
            .tag("hdb")
            .buyers([1])
            .sellers([2])
            .build()?,
        PropertyBuilder::new("7 Holland Grove Drive", "278844", 4_200_000)
            .id(3)
            .floor_area(300)
            .rooms(5, 4)
            .tag("landed")
            .build()?,
    ];
    AddressBook::from_parts(contacts, properties)
}
