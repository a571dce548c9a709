//! GTI Luminator MegaMax 3000 front sign, 98×16, sign ID 6
//!
//! The controller's image memory is laid out for a wider panel than the
//! 98 columns actually fitted, so register 2 falls on a missing block of
//! dots and is always sent blank, and register 3 only carries data in its
//! last four bytes.

use flipdot_protocol::{ControlFrames, RegisterEntry, RegisterLayout};

use super::SignProfile;
use crate::config::SignTiming;

const REGISTERS: [RegisterEntry; 15] = [
    RegisterEntry::data(0x0, 0, 12, "10000000010A0000"),
    RegisterEntry::data(0x1, 12, 16, "10001000"),
    RegisterEntry::blank(0x2, "10002000", "00000000000000000000000000000000"),
    RegisterEntry::data(0x3, 28, 4, "10003000000000000000000000000000"),
    RegisterEntry::data(0x4, 32, 16, "10004000"),
    RegisterEntry::data(0x5, 48, 16, "10005000"),
    RegisterEntry::data(0x6, 64, 16, "10006000"),
    RegisterEntry::data(0x7, 80, 16, "10007000"),
    RegisterEntry::data(0x8, 96, 16, "10008000"),
    RegisterEntry::data(0x9, 112, 16, "10009000"),
    RegisterEntry::data(0xA, 128, 16, "1000A000"),
    RegisterEntry::data(0xB, 144, 16, "1000B000"),
    RegisterEntry::data(0xC, 160, 16, "1000C000"),
    RegisterEntry::data(0xD, 176, 16, "1000D000"),
    RegisterEntry::data(0xE, 192, 4, "1000E000").with_trailer("000000000000000000000000"),
];

const CONTROL: ControlFrames = ControlFrames {
    init: &[
        ":01000502FFF9",
        ":01000602FFF8",
        ":01000603A155",
        ":100000000447000F101C1C1C1C1000000000000006",
        ":00000101FE",
        ":0100060200F7",
    ],
    begin_image: &[":01000603A254"],
    commit_image: &[
        ":00000F01F0",
        ":0100060200F7",
        ":0100060600F3",
        ":0100060200F7",
        ":01000603A94D",
    ],
    close: &[
        ":01000603A94D",
        ":01000603AA4C",
        ":01007F02FF7F",
        ":0100060255A2",
        ":01000603A650",
    ],
};

/// MegaMax 3000 front destination sign, 98×16
pub const MEGAMAX_3000_FRONT: SignProfile = SignProfile {
    name: "MegaMax 3000 front 98x16",
    width: 98,
    height: 16,
    layout: RegisterLayout::new(&REGISTERS),
    control: CONTROL,
    timing: SignTiming::REFERENCE,
};
