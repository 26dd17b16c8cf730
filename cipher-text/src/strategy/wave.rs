//! # Wave 策略
//!
//! 跑马灯：所有字符循环左移一位，首字符移到末尾。

/// 循环左移一位；长度不超过 1 时原样返回
pub fn wave(text: &str) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    wave_units(&mut chars);
    chars.into_iter().collect()
}

/// 对并行的逐字符元数据（如颜色标签）做同样的旋转
pub fn wave_units<T>(units: &mut [T]) {
    if units.len() > 1 {
        units.rotate_left(1);
    }
}
