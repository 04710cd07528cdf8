fn main() {
    // Embed Windows resources (version info)
    #[cfg(windows)]
    {
        let mut res = winres::WindowsResource::new();
        res.set("ProductName", "ColorClock");
        res.set("FileDescription", "Color Clock Screensaver");
        res.set("CompanyName", "ColorClock Contributors");
        res.set("LegalCopyright", "Copyright © 2024 ColorClock Contributors");
        res.set("OriginalFilename", "colorclock.scr");
        res.set("FileVersion", env!("CARGO_PKG_VERSION"));
        res.set("ProductVersion", env!("CARGO_PKG_VERSION"));
        res.compile().unwrap();
    }
}
