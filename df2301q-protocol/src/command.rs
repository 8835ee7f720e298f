//! Command ids reported by the DF2301Q module

/// A command recognised by the voice module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VoiceCommand {
    /// Command id 5
    VoiceCmd5,
    /// Command id 6
    VoiceCmd6,
    /// Command id 7
    VoiceCmd7,
    /// Any other non-zero id
    Unknown(u8),
}

// Wire format values
const CMD_5: u8 = 5;
const CMD_6: u8 = 6;
const CMD_7: u8 = 7;

impl VoiceCommand {
    /// Interpret an id taken from the latch
    ///
    /// Returns `None` for 0, which means no command is pending.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => None,
            CMD_5 => Some(VoiceCommand::VoiceCmd5),
            CMD_6 => Some(VoiceCommand::VoiceCmd6),
            CMD_7 => Some(VoiceCommand::VoiceCmd7),
            other => Some(VoiceCommand::Unknown(other)),
        }
    }

    /// The raw command id
    pub fn id(self) -> u8 {
        match self {
            VoiceCommand::VoiceCmd5 => CMD_5,
            VoiceCommand::VoiceCmd6 => CMD_6,
            VoiceCommand::VoiceCmd7 => CMD_7,
            VoiceCommand::Unknown(id) => id,
        }
    }

    /// Returns true for ids without a defined meaning
    pub fn is_unknown(&self) -> bool {
        matches!(self, VoiceCommand::Unknown(_))
    }

    /// Human readable description for logs
    pub fn description(&self) -> &'static str {
        match self {
            VoiceCommand::VoiceCmd5 => "Voice Command 5 detected",
            VoiceCommand::VoiceCmd6 => "Voice Command 6 detected",
            VoiceCommand::VoiceCmd7 => "Voice Command 7 detected",
            VoiceCommand::Unknown(_) => "Unknown Command",
        }
    }
}
