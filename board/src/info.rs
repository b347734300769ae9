/// Static description of a board, exposed through `Board::info`.
#[derive(Debug, PartialEq)]
pub struct BoardInfo {
    pub name: &'static str,
    pub vendor: &'static str,
    pub url: &'static str,
    pub mcu: &'static str,
    pub module: &'static str,
    pub flash_size: &'static str,
    pub ram_size: &'static str,
    pub ram_user_size: &'static str,
    /// Name, vendor and url joined into one printable block.
    pub summary: &'static str,
}

/// Builds a `BoardInfo` whose `summary` is assembled at compile time.
#[macro_export]
macro_rules! board_info {
    (
        name: $name:literal,
        vendor: $vendor:literal,
        url: $url:literal,
        mcu: $mcu:literal,
        module: $module:literal,
        flash_size: $flash:literal,
        ram_size: $ram:literal,
        ram_user_size: $ram_user:literal $(,)?
    ) => {
        $crate::info::BoardInfo {
            name: $name,
            vendor: $vendor,
            url: $url,
            mcu: $mcu,
            module: $module,
            flash_size: $flash,
            ram_size: $ram,
            ram_user_size: $ram_user,
            summary: concat!("BOARD_NAME: ", $name, "\nVENDOR: ", $vendor, "\nURL: ", $url, "\n"),
        }
    };
}

pub const MESHKIT_SENSE_INFO: BoardInfo = board_info! {
    name: "ESP32-MESHKIT-SENSE_V1_1",
    vendor: "Espressif",
    url: "https://github.com/espressif/esp-iot-solution/blob/master/documents/evaluation_boards/ESP32-MeshKit-Sense_guide_cn.md",
    mcu: "ESP32",
    module: "ESP32-WROOM-32D",
    flash_size: "4MB",
    ram_size: "520KB",
    ram_user_size: "320KB",
};
