#![allow(unused_imports)]

#[macro_use]
mod definitions {
    use cfg_if::cfg_if;

    cfg_if! {
        if #[cfg(feature = "allocator_api")] {
            pub use alloc::alloc::{AllocError, Allocator, Global};
        } else {
            use alloc::alloc::Layout;
            use core::fmt;
            use core::ptr::NonNull;

            /// The error returned by [`Allocator::allocate`] when the request cannot be met.
            #[derive(Copy, Clone, PartialEq, Eq, Debug)]
            pub struct AllocError;

            impl fmt::Display for AllocError {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("memory allocation failed")
                }
            }

            /// Stable stand-in for `core::alloc::Allocator`.
            ///
            /// The default methods forward to the global allocator, so [`Global`] is just an
            /// empty implementation.
            ///
            /// # Safety
            ///
            /// Memory returned by `allocate` must stay valid until it is passed to
            /// `deallocate` on the same allocator (or a clone of it) with the same layout.
            pub unsafe trait Allocator {
                #[inline]
                fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
                    unsafe {
                        let len = layout.size();
                        let data = if len == 0 {
                            layout.align() as *mut u8
                        } else {
                            NonNull::new(alloc::alloc::alloc(layout)).ok_or(AllocError)?.as_ptr()
                        };
                        Ok(NonNull::new_unchecked(core::ptr::slice_from_raw_parts_mut(
                            data, len,
                        )))
                    }
                }

                /// # Safety
                ///
                /// `ptr` must denote a block currently allocated by this allocator with
                /// `layout`.
                #[inline]
                unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
                    if layout.size() != 0 {
                        unsafe { alloc::alloc::dealloc(ptr.as_ptr(), layout) }
                    }
                }
            }

            #[derive(Copy, Clone, Default, Debug)]
            pub struct Global;

            unsafe impl Allocator for Global {}
        }
    }

    macro_rules! decorate_if {
        (
            $(#[$attr:meta])*
            if #[cfg($vis_m:meta)] { $(#[$vis_attr:meta])* $vis:vis }
            $($rest:tt)+
        ) => {
            cfg_if::cfg_if! {
                if #[cfg($vis_m)] {
                    $(#[$attr])*
                    $(#[$vis_attr])*
                    #[cfg_attr(docsrs, doc(cfg($vis_m)))]
                    $vis $($rest)+
                } else {
                    $(#[$attr])*
                    #[allow(dead_code)]
                    pub(crate) $($rest)+
                }
            }
        };
    }
}

pub(crate) use definitions::{AllocError, Allocator, Global};
