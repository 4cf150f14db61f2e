//! Register addresses.

pub mod rk816 {
    pub const CHIP_NAME: u8 = 0x17;
    pub const CHIP_VER: u8 = 0x18;
    pub const OTP_VER: u8 = 0x19;

    pub const VB_MON: u8 = 0x21;
    pub const THERMAL: u8 = 0x22;

    // Power channel enables
    pub const DCDC_EN_REG1: u8 = 0x23;
    pub const DCDC_EN_REG2: u8 = 0x24;
    pub const SLP_DCDC_EN: u8 = 0x25;
    pub const SLP_LDO_EN: u8 = 0x26;
    pub const LDO_EN_REG1: u8 = 0x27;
    pub const LDO_EN_REG2: u8 = 0x28;

    pub const SW_BUCK_LDO_CONFIG: u8 = 0x2a;
    pub const BUCK5_ON_VSEL: u8 = 0x2b;
    pub const BUCK5_SLP_VSEL: u8 = 0x2c;
    pub const BUCK5_CONFIG: u8 = 0x2d;
    pub const BUCK1_CONFIG: u8 = 0x2e;
    pub const BUCK1_ON_VSEL: u8 = 0x2f;
    pub const BUCK1_SLP_VSEL: u8 = 0x30;
    pub const BUCK2_CONFIG: u8 = 0x32;
    pub const BUCK2_ON_VSEL: u8 = 0x33;
    pub const BUCK2_SLP_VSEL: u8 = 0x34;
    pub const BUCK3_CONFIG: u8 = 0x36;
    pub const BUCK4_CONFIG: u8 = 0x37;
    pub const BUCK4_ON_VSEL: u8 = 0x38;
    pub const BUCK4_SLP_VSEL: u8 = 0x39;
    pub const LDO1_ON_VSEL: u8 = 0x3b;
    pub const LDO1_SLP_VSEL: u8 = 0x3c;
    pub const LDO2_ON_VSEL: u8 = 0x3d;
    pub const LDO2_SLP_VSEL: u8 = 0x3e;
    pub const LDO3_ON_VSEL: u8 = 0x3f;
    pub const LDO3_SLP_VSEL: u8 = 0x40;
    pub const LDO4_ON_VSEL: u8 = 0x41;
    pub const LDO4_SLP_VSEL: u8 = 0x42;
    pub const LDO5_ON_VSEL: u8 = 0x43;
    pub const LDO5_SLP_VSEL: u8 = 0x44;
    pub const LDO6_ON_VSEL: u8 = 0x45;
    pub const LDO6_SLP_VSEL: u8 = 0x46;

    pub const PWRON_LP_INT_TIME: u8 = 0x47;
    pub const PWRON_DB: u8 = 0x48;
    pub const DEV_CTRL: u8 = 0x4b;
}

pub mod rk805 {
    pub const THERMAL: u8 = 0x22;

    // Power channel enables
    pub const DCDC_EN: u8 = 0x23;
    pub const SLP_DCDC_EN: u8 = 0x25;
    pub const SLP_LDO_EN: u8 = 0x26;
    pub const LDO_EN: u8 = 0x27;

    pub const BUCK_LDO_SLP_LP_EN: u8 = 0x2a;
    pub const BUCK1_CONFIG: u8 = 0x2e;
    pub const BUCK1_ON_VSEL: u8 = 0x2f;
    pub const BUCK1_SLP_VSEL: u8 = 0x30;
    pub const BUCK2_CONFIG: u8 = 0x32;
    pub const BUCK2_ON_VSEL: u8 = 0x33;
    pub const BUCK2_SLP_VSEL: u8 = 0x34;
    pub const BUCK3_CONFIG: u8 = 0x36;
    pub const BUCK4_CONFIG: u8 = 0x37;
    pub const BUCK4_ON_VSEL: u8 = 0x38;
    pub const BUCK4_SLP_VSEL: u8 = 0x39;
    pub const LDO1_ON_VSEL: u8 = 0x3b;
    pub const LDO1_SLP_VSEL: u8 = 0x3c;
    pub const LDO2_ON_VSEL: u8 = 0x3d;
    pub const LDO2_SLP_VSEL: u8 = 0x3e;
    pub const LDO3_ON_VSEL: u8 = 0x3f;
    pub const LDO3_SLP_VSEL: u8 = 0x40;

    pub const INT_STS: u8 = 0x4c;
    pub const INT_STS_MSK: u8 = 0x4d;
    pub const ON_SOURCE: u8 = 0xae;
    pub const OFF_SOURCE: u8 = 0xaf;
}
