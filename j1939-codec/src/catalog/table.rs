//! Built-in reference DTC table
//!
//! Append-only: a definition's position is its encoded catalog index, so
//! existing rows must never be reordered or removed.

/// Reference (SPN, FMI) definitions in catalog order
pub(crate) const REFERENCE_TABLE: &[(u32, u8)] = &[
    // Wheel-based vehicle speed
    (84, 2), (84, 9),
    // Accelerator pedal position 1
    (91, 2), (91, 3), (91, 4),
    // Fuel delivery pressure
    (94, 1), (94, 3), (94, 4), (94, 18),
    // Water in fuel indicator
    (97, 3), (97, 4), (97, 15),
    // Engine oil level
    (98, 1), (98, 3), (98, 4), (98, 17),
    // Engine oil pressure
    (100, 1), (100, 3), (100, 4), (100, 17), (100, 18),
    // Intake manifold boost pressure
    (102, 2), (102, 3), (102, 4),
    // Intake manifold temperature
    (105, 0), (105, 3), (105, 4), (105, 15),
    // Barometric pressure
    (108, 2), (108, 3), (108, 4),
    // Engine coolant temperature
    (110, 0), (110, 3), (110, 4), (110, 15), (110, 16),
    // Coolant level
    (111, 1), (111, 3), (111, 4), (111, 17),
    // Injector metering rail pressure
    (157, 0), (157, 1), (157, 3), (157, 4), (157, 16), (157, 18),
    // Keyswitch battery potential
    (158, 2), (158, 3), (158, 4),
    // Charging system potential
    (167, 0), (167, 1), (167, 3), (167, 4),
    // Battery potential
    (168, 0), (168, 1), (168, 2), (168, 3), (168, 4),
    // Ambient air temperature
    (171, 2), (171, 3), (171, 4),
    // Air inlet temperature
    (172, 2), (172, 3), (172, 4),
    // Fuel temperature
    (174, 0), (174, 3), (174, 4),
    // Engine oil temperature
    (175, 0), (175, 3), (175, 4), (175, 16),
    // Transmission oil temperature
    (177, 0), (177, 3), (177, 4), (177, 16),
    // Engine speed
    (190, 0), (190, 2), (190, 8), (190, 16),
    // EGR temperature
    (412, 3), (412, 4), (412, 15),
    // Actual engine torque
    (513, 2),
    // Actual retarder torque
    (520, 9),
    // Current gear
    (523, 2), (523, 9),
    // Selected gear
    (524, 9),
    // Requested gear
    (525, 9),
    // Actual gear ratio
    (526, 9),
    // Cruise control states
    (527, 9),
    // Accelerator pedal idle switch
    (558, 2), (558, 3), (558, 4), (558, 13),
    // ABS active
    (563, 9),
    // Cruise control enable switch
    (596, 2),
    // Brake switch
    (597, 2),
    // Clutch switch
    (598, 2),
    // Cruise control set switch
    (599, 2),
    // Controller identification
    (609, 9),
    // Injector wiring
    (611, 3), (611, 4),
    // Engine speed sensor
    (612, 2),
    // Intake air heater
    (626, 3), (626, 4),
    // Power supply
    (627, 1), (627, 4),
    // Controller 1
    (629, 12),
    // Calibration memory
    (630, 2), (630, 12),
    // Calibration module
    (631, 12),
    // Fuel control valve 1
    (633, 3), (633, 4), (633, 5),
    // Camshaft position sensor
    (636, 2), (636, 8),
    // Crankshaft position sensor
    (637, 2), (637, 8),
    // J1939 network 1
    (639, 9), (639, 14),
    // Variable geometry turbo actuator
    (641, 7), (641, 12),
    // Fan clutch output
    (647, 3), (647, 4), (647, 5),
    // Injector cylinder 1
    (651, 3), (651, 5),
    // Injector cylinder 2
    (652, 3), (652, 5),
    // Injector cylinder 3
    (653, 3), (653, 5),
    // Injector cylinder 4
    (654, 3), (654, 5),
    // Injector cylinder 5
    (655, 3), (655, 5),
    // Injector cylinder 6
    (656, 3), (656, 5),
    // Starter relay
    (677, 3), (677, 4),
    // Auxiliary I/O 1
    (701, 3), (701, 4),
    // Auxiliary I/O 2
    (702, 3), (702, 4),
    // Auxiliary I/O 3
    (703, 3), (703, 4),
    // Engine speed sensor 2
    (723, 2), (723, 8),
    // ECU temperature
    (1136, 0), (1136, 3), (1136, 4),
    // Turbo compressor inlet temperature
    (1172, 3), (1172, 4),
    // Turbo compressor inlet pressure
    (1176, 3), (1176, 4),
    // Exhaust gas pressure
    (1209, 3), (1209, 4),
    // Engine protection torque derate
    (1569, 31),
    // Engine starter mode
    (1675, 3), (1675, 4),
    // EGR valve control
    (2791, 3), (2791, 5), (2791, 7),
    // DEF tank temperature
    (3031, 3), (3031, 4),
    // Aftertreatment intake NOx
    (3216, 2), (3216, 4),
    // Aftertreatment outlet NOx
    (3226, 2), (3226, 4),
    // DPF intake gas temperature
    (3242, 3), (3242, 4),
    // DPF differential pressure
    (3251, 3), (3251, 4),
    // DEF dosing unit
    (3361, 3), (3361, 5),
    // DEF quality
    (3364, 1), (3364, 18),
    // Throttle actuator control
    (3464, 3), (3464, 4),
    // DEF concentration
    (3516, 2), (3516, 18),
    // DPF soot load
    (3719, 0), (3719, 16),
    // DEF doser pressure
    (4334, 3), (4334, 4),
    // SCR conversion efficiency
    (4364, 17), (4364, 18),
    // SCR operator inducement severity
    (5246, 0), (5246, 15), (5246, 16),
];
