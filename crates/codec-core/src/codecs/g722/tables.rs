//! G.722 Tables and Constants
//!
//! Quantizer, scale-factor and QMF tables of the 64 kbit/s (mode 1) encoder.

/// QMF filter coefficients, already doubled
pub const COEF_QMF: [i16; 24] = [
    6, -22, -22, 106, 24, -312, 64, 724, -420, -1610, 1902, 7752,
    7752, 1902, -1610, -420, 724, 64, -312, 24, 106, -22, -22, 6,
];

/// Low-band codeword by sign (row) and quantizer interval (column)
pub const MISIL: [[i16; 32]; 2] = [
    [
        0x0000, 0x003F, 0x003E, 0x001F, 0x001E, 0x001D, 0x001C, 0x001B,
        0x001A, 0x0019, 0x0018, 0x0017, 0x0016, 0x0015, 0x0014, 0x0013,
        0x0012, 0x0011, 0x0010, 0x000F, 0x000E, 0x000D, 0x000C, 0x000B,
        0x000A, 0x0009, 0x0008, 0x0007, 0x0006, 0x0005, 0x0004, 0x0000,
    ],
    [
        0x0000, 0x003D, 0x003C, 0x003B, 0x003A, 0x0039, 0x0038, 0x0037,
        0x0036, 0x0035, 0x0034, 0x0033, 0x0032, 0x0031, 0x0030, 0x002F,
        0x002E, 0x002D, 0x002C, 0x002B, 0x002A, 0x0029, 0x0028, 0x0027,
        0x0026, 0x0025, 0x0024, 0x0023, 0x0022, 0x0021, 0x0020, 0x0000,
    ],
];

/// Low-band 6-bit quantizer decision levels
pub const Q6: [i16; 31] = [
    0, 35, 72, 110, 150, 190, 233, 276,
    323, 370, 422, 473, 530, 587, 650, 714,
    786, 858, 940, 1023, 1121, 1219, 1339, 1458,
    1612, 1765, 1980, 2195, 2557, 2919, 3200,
];

/// 4-bit magnitude index of a low-band codeword (codeword >> 2)
pub const RIL4: [i16; 16] = [0, 7, 6, 5, 4, 3, 2, 1, 7, 6, 5, 4, 3, 2, 1, 0];

/// Sign of a low-band codeword (codeword >> 2), -1 for negative
pub const RISIL: [i16; 16] = [0, -1, -1, -1, -1, -1, -1, -1, 0, 0, 0, 0, 0, 0, 0, 0];

/// Low-band 4-bit inverse quantizer output levels
pub const OQ4: [i16; 8] = [0, 150, 323, 530, 786, 1121, 1612, 2557];

/// Low-band log scale factor multipliers
pub const WL: [i16; 8] = [-60, -30, 58, 172, 334, 538, 1198, 3042];

/// Inverse log table for the scale factor
pub const ILA: [i16; 353] = [
    1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 2, 2, 2, 2, 2,
    2, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 3, 3, 3,
    3, 3, 3, 4, 4, 4, 4, 4,
    4, 4, 4, 5, 5, 5, 5, 5,
    5, 5, 6, 6, 6, 6, 6, 6,
    7, 7, 7, 7, 7, 7, 8, 8,
    8, 8, 8, 9, 9, 9, 9, 10,
    10, 10, 10, 11, 11, 11, 11, 12,
    12, 12, 13, 13, 13, 13, 14, 14,
    15, 15, 15, 16, 16, 16, 17, 17,
    18, 18, 18, 19, 19, 20, 20, 21,
    21, 22, 22, 23, 23, 24, 24, 25,
    25, 26, 27, 27, 28, 28, 29, 30,
    31, 31, 32, 33, 33, 34, 35, 36,
    37, 37, 38, 39, 40, 41, 42, 43,
    44, 45, 46, 47, 48, 49, 50, 51,
    52, 54, 55, 56, 57, 58, 60, 61,
    63, 64, 65, 67, 68, 70, 71, 73,
    75, 76, 78, 80, 82, 83, 85, 87,
    89, 91, 93, 95, 97, 99, 102, 104,
    106, 109, 111, 113, 116, 118, 121, 124,
    127, 129, 132, 135, 138, 141, 144, 147,
    151, 154, 157, 161, 165, 168, 172, 176,
    180, 184, 188, 192, 196, 200, 205, 209,
    214, 219, 223, 228, 233, 238, 244, 249,
    255, 260, 266, 272, 278, 284, 290, 296,
    303, 310, 316, 323, 331, 338, 345, 353,
    361, 369, 377, 385, 393, 402, 411, 420,
    429, 439, 448, 458, 468, 478, 489, 500,
    511, 522, 533, 545, 557, 569, 582, 594,
    607, 621, 634, 648, 663, 677, 692, 707,
    723, 739, 755, 771, 788, 806, 823, 841,
    860, 879, 898, 918, 938, 958, 979, 1001,
    1023, 1045, 1068, 1092, 1115, 1140, 1165, 1190,
    1216, 1243, 1270, 1298, 1327, 1356, 1386, 1416,
    1447, 1479, 1511, 1544, 1578, 1613, 1648, 1684,
    1721, 1759, 1797, 1837, 1877, 1918, 1960, 2003,
    2047, 2092, 2138, 2185, 2232, 2281, 2331, 2382,
    2434, 2488, 2542, 2598, 2655, 2713, 2773, 2833,
    2895, 2959, 3024, 3090, 3157, 3227, 3297, 3370,
    3443, 3519, 3596, 3675, 3755, 3837, 3921, 4007,
    4095,
];

/// High-band codeword by sign (row) and interval (column)
pub const MISIH: [[i16; 3]; 2] = [[0, 1, 0], [0, 3, 2]];

/// Magnitude index of a high-band codeword
pub const IH2: [i16; 4] = [2, 1, 2, 1];

/// Sign of a high-band codeword, -1 for negative
pub const SIH: [i16; 4] = [-1, -1, 0, 0];

/// High-band inverse quantizer output levels
pub const OQ2: [i16; 3] = [0, 202, 926];

/// High-band log scale factor multipliers
pub const WH: [i16; 3] = [0, -214, 798];

/// Upper bound of the low-band log scale factor
pub const NBL_MAX: i16 = 18432;

/// Upper bound of the high-band log scale factor
pub const NBH_MAX: i16 = 22528;
