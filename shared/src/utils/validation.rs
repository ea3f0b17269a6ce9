// Validasi field request chat

// Ambil value field wajib, None kalau tidak ada, null, atau string kosong.
// Whitespace tetap dihitung sebagai isi.
pub fn required(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
