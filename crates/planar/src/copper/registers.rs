// STD Dependencies -----------------------------------------------------------
use std::collections::HashMap;


// External Dependencies ------------------------------------------------------
use lazy_static::lazy_static;


// Statics --------------------------------------------------------------------
lazy_static! {
    /// Custom chip register offsets and common display constants.
    pub static ref REGISTERS: HashMap<&'static str, u16> = {
        let mut map = HashMap::with_capacity(96);
        map.insert("FMODE", 0x1fc);
        map.insert("DIWSTRT", 0x08e);
        map.insert("DIWSTOP", 0x090);
        map.insert("DDFSTRT", 0x092);
        map.insert("DDFSTOP", 0x094);
        map.insert("DMACON", 0x096);

        map.insert("BPLCON0", 0x100);
        map.insert("BPLCON1", 0x102);
        map.insert("BPLCON2", 0x104);
        map.insert("BPL1MOD", 0x108);
        map.insert("BPL2MOD", 0x10a);

        // Values
        map.insert("DDFSTRT_VALUE_320", 0x0038);
        map.insert("DDFSTOP_VALUE_320", 0x00d0);
        map.insert("DIWSTRT_VALUE_320", 0x2c81);
        map.insert("DIWSTOP_VALUE_PAL_320", 0x2cc1);

        for (index, name) in BITPLANE_POINTERS.iter().enumerate() {
            map.insert(*name, 0x0e0 + index as u16 * 2);
        }
        for (index, name) in SPRITE_POINTERS.iter().enumerate() {
            map.insert(*name, 0x120 + index as u16 * 2);
        }
        for (index, name) in COLORS.iter().enumerate() {
            map.insert(*name, 0x180 + index as u16 * 2);
        }
        map
    };
}

const BITPLANE_POINTERS: [&str; 12] = [
    "BPL1PTH", "BPL1PTL", "BPL2PTH", "BPL2PTL", "BPL3PTH", "BPL3PTL",
    "BPL4PTH", "BPL4PTL", "BPL5PTH", "BPL5PTL", "BPL6PTH", "BPL6PTL"
];

const SPRITE_POINTERS: [&str; 16] = [
    "SPR0PTH", "SPR0PTL", "SPR1PTH", "SPR1PTL", "SPR2PTH", "SPR2PTL",
    "SPR3PTH", "SPR3PTL", "SPR4PTH", "SPR4PTL", "SPR5PTH", "SPR5PTL",
    "SPR6PTH", "SPR6PTL", "SPR7PTH", "SPR7PTL"
];

const COLORS: [&str; 32] = [
    "COLOR00", "COLOR01", "COLOR02", "COLOR03", "COLOR04", "COLOR05", "COLOR06", "COLOR07",
    "COLOR08", "COLOR09", "COLOR10", "COLOR11", "COLOR12", "COLOR13", "COLOR14", "COLOR15",
    "COLOR16", "COLOR17", "COLOR18", "COLOR19", "COLOR20", "COLOR21", "COLOR22", "COLOR23",
    "COLOR24", "COLOR25", "COLOR26", "COLOR27", "COLOR28", "COLOR29", "COLOR30", "COLOR31"
];

pub fn lookup(name: &str) -> Option<u16> {
    REGISTERS.get(name).copied()
}


// Tests ----------------------------------------------------------------------
#[cfg(test)]
mod test {
    use super::{lookup, REGISTERS};

    #[test]
    fn test_register_offsets() {
        assert_eq!(lookup("BPL1PTH"), Some(0x0e0));
        assert_eq!(lookup("BPL6PTL"), Some(0x0f6));
        assert_eq!(lookup("SPR7PTL"), Some(0x13e));
        assert_eq!(lookup("COLOR00"), Some(0x180));
        assert_eq!(lookup("COLOR31"), Some(0x1be));
        assert_eq!(lookup("DIWSTOP_VALUE_PAL_320"), Some(0x2cc1));
        assert_eq!(lookup("color00"), None);
    }

    #[test]
    fn test_register_count() {
        assert_eq!(REGISTERS.len(), 6 + 5 + 4 + 12 + 16 + 32);
    }
}
