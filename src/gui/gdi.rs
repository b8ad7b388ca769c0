//! GDI implementation of [`Canvas`]

use crate::layout::{Point, Rect};
use crate::render::{Canvas, Pen, Stroke};
use crate::types::Rgb;
use windows::Win32::Foundation::{COLORREF, RECT};
use windows::Win32::Graphics::Gdi::{
    CreatePen, CreateSolidBrush, DeleteObject, Ellipse, FillRect, GetStockObject, HDC, HGDIOBJ,
    LineTo, MoveToEx, NULL_BRUSH, PS_DOT, PS_SOLID, SelectObject,
};

/// Canvas drawing into a device context obtained from `BeginPaint`
pub(super) struct GdiCanvas {
    hdc: HDC,
}

impl GdiCanvas {
    pub(super) fn new(hdc: HDC) -> Self {
        Self { hdc }
    }

    /// Run `draw` with a pen selected, then restore and free it
    fn with_pen(&mut self, pen: Pen, draw: impl FnOnce(HDC)) {
        let style = match pen.stroke {
            Stroke::Solid => PS_SOLID,
            Stroke::Dotted => PS_DOT,
        };
        unsafe {
            let gdi_pen = CreatePen(style, pen.width, colorref(pen.color));
            let previous = SelectObject(self.hdc, gdi_pen.into());
            draw(self.hdc);
            SelectObject(self.hdc, previous);
            let _ = DeleteObject(gdi_pen.into());
        }
    }
}

impl Canvas for GdiCanvas {
    fn fill(&mut self, area: Rect, color: Rgb) {
        let rect = RECT { left: area.left, top: area.top, right: area.right, bottom: area.bottom };
        unsafe {
            let brush = CreateSolidBrush(colorref(color));
            FillRect(self.hdc, &rect, brush);
            let _ = DeleteObject(brush.into());
        }
    }

    fn line(&mut self, from: Point, to: Point, pen: Pen) {
        self.with_pen(pen, |hdc| unsafe {
            let _ = MoveToEx(hdc, from.x, from.y, None);
            let _ = LineTo(hdc, to.x, to.y);
        });
    }

    fn ellipse(&mut self, bounds: Rect, pen: Pen) {
        self.with_pen(pen, |hdc| unsafe {
            // Stock objects are never deleted.
            let hollow: HGDIOBJ = GetStockObject(NULL_BRUSH);
            let previous = SelectObject(hdc, hollow);
            let _ = Ellipse(hdc, bounds.left, bounds.top, bounds.right, bounds.bottom);
            SelectObject(hdc, previous);
        });
    }
}

fn colorref(color: Rgb) -> COLORREF {
    COLORREF(u32::from(color.r) | (u32::from(color.g) << 8) | (u32::from(color.b) << 16))
}
