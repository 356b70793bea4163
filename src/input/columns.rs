/// A named input signal and the header spellings it may appear under.
#[derive(Debug, Clone, Copy)]
pub struct SignalDef {
    pub id: &'static str,
    pub aliases: &'static [&'static str],
}

pub const TIMESTAMP: SignalDef = SignalDef {
    id: "timestamp",
    aliases: &["timestamp", "time", "t"],
};

pub const PELVIS_ROT: SignalDef = SignalDef {
    id: "pelvis_rotation",
    aliases: &["pelvis_rot", "pelvis_rotation"],
};

pub const TORSO_ROT: SignalDef = SignalDef {
    id: "torso_rotation",
    aliases: &["torso_rot", "torso_rotation"],
};

pub const BAT_KE: SignalDef = SignalDef {
    id: "bat_kinetic_energy",
    aliases: &["bat_kinetic_energy", "bat_ke"],
};

pub const TOTAL_KE: SignalDef = SignalDef {
    id: "total_kinetic_energy",
    aliases: &["total_kinetic_energy", "total_ke"],
};

pub const LEGS_KE: SignalDef = SignalDef {
    id: "legs_kinetic_energy",
    aliases: &["legs_kinetic_energy", "legs_ke"],
};

pub const LEFT_LEG_KE: SignalDef = SignalDef {
    id: "lleg_kinetic_energy",
    aliases: &["lleg_kinetic_energy", "lleg_ke"],
};

pub const RIGHT_LEG_KE: SignalDef = SignalDef {
    id: "rleg_kinetic_energy",
    aliases: &["rleg_kinetic_energy", "rleg_ke"],
};

pub const PELVIS_MOMENTUM: SignalDef = SignalDef {
    id: "pelvis_angular_momentum_z",
    aliases: &[
        "lowertorso_angular_momentum_z",
        "pelvis_angular_momentum_z",
    ],
};

pub const TORSO_MOMENTUM: SignalDef = SignalDef {
    id: "torso_angular_momentum_z",
    aliases: &["torso_angular_momentum_z"],
};

pub const ARMS_MOMENTUM: SignalDef = SignalDef {
    id: "arms_angular_momentum_z",
    aliases: &["arms_angular_momentum_z", "larm_angular_momentum_z"],
};

pub const CONTACT_FRAME: SignalDef = SignalDef {
    id: "contact_frame",
    aliases: &["contact_frame"],
};

pub const MOVEMENT_ID: SignalDef = SignalDef {
    id: "movement_id",
    aliases: &["movement_id", "movementid", "swing_id", "trial_id", "movement"],
};

/// Substring matching is only attempted for aliases at least this long.
pub const MIN_SUBSTRING_ALIAS: usize = 3;

/// Index of the column matching `signal`: exact alias match first, in alias
/// order, then the first header containing an alias.
pub fn resolve_column(headers: &[String], signal: &SignalDef) -> Option<usize> {
    for alias in signal.aliases {
        if let Some(idx) = headers.iter().position(|h| h == alias) {
            return Some(idx);
        }
    }
    for alias in signal.aliases {
        if alias.len() < MIN_SUBSTRING_ALIAS {
            continue;
        }
        if let Some(idx) = headers.iter().position(|h| h.contains(alias)) {
            return Some(idx);
        }
    }
    None
}

/// Whether a header names a joint angle (as opposed to a rate, energy or momentum).
pub fn is_angle_column(header: &str) -> bool {
    const EXCLUDED: &[&str] = &["vel", "momentum", "energy", "_ke", "frame", "time"];
    let angle_like = header.contains("rot") || header.contains("angle");
    angle_like && !EXCLUDED.iter().any(|x| header.contains(x))
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/columns.rs"]
mod tests;
