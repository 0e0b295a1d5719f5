pub type ParticipationFlags = u8;
